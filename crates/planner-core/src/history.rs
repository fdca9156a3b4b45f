//! Calculation history
//!
//! Every successful calculation records the month's snapshot, its derived
//! category totals, and the server-confirmed grand total. Recalculating a
//! month overwrites its record. Nothing here ever deletes a record;
//! retention is the caller's concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::month::MonthKey;
use crate::store::CategorySnapshot;
use crate::totals::CategoryTotal;

/// One month's recorded calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Category state at the time of calculation
    pub snapshot: CategorySnapshot,
    /// Per-category totals in display order
    pub totals: Vec<CategoryTotal>,
    /// Server-confirmed grand total
    pub grand_total: f64,
}

/// Accumulated month → record mapping
///
/// Backed by a `BTreeMap` keyed on the month key, so iteration order is
/// chronological (the key is zero-padded `YYYY-MM`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    records: BTreeMap<MonthKey, MonthRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for a month
    pub fn record(&mut self, month: MonthKey, record: MonthRecord) {
        self.records.insert(month, record);
    }

    pub fn get(&self, month: &MonthKey) -> Option<&MonthRecord> {
        self.records.get(month)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recorded months in chronological order
    pub fn months(&self) -> impl Iterator<Item = &MonthKey> {
        self.records.keys()
    }

    /// The two most recent recorded months, earlier first
    ///
    /// This is the default pair for the summary view when no explicit
    /// selection is supplied.
    pub fn two_most_recent(&self) -> Result<(&MonthKey, &MonthKey)> {
        let mut keys = self.records.keys().rev();
        let latest = keys.next().ok_or(Error::MissingHistory)?;
        let previous = keys.next().ok_or(Error::MissingHistory)?;
        Ok((previous, latest))
    }
}
