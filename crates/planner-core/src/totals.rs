//! Totals derivation
//!
//! Pure derivation from a category snapshot to per-category numeric totals.
//! Raw items that do not parse as numbers count as zero, so a snapshot with
//! half-typed input still yields a total. Recomputed after every store
//! mutation; the grand total is only ever set from a successful calculation
//! service response, never from the local sum.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::CategorySnapshot;

/// One category's derived total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

/// Per-category totals in display order, plus the server-confirmed grand total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsView {
    pub categories: Vec<CategoryTotal>,
    /// Authoritative monthly total from the calculation service; stays `None`
    /// until a calculation for the current month succeeds.
    pub grand_total: Option<f64>,
}

impl TotalsView {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.total)
    }

    /// Sum of the locally derived category totals
    pub fn local_sum(&self) -> f64 {
        self.categories.iter().map(|c| c.total).sum()
    }

    /// Name → total map for the calculation service payload
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.categories
            .iter()
            .map(|c| (c.name.clone(), c.total))
            .collect()
    }
}

/// Derive per-category totals from a snapshot
///
/// Idempotent and side-effect free; the snapshot is never mutated.
pub fn compute_totals(snapshot: &CategorySnapshot) -> TotalsView {
    let categories = snapshot
        .iter()
        .map(|category| CategoryTotal {
            name: category.name.clone(),
            total: category.items.iter().map(|item| parse_amount(item)).sum(),
        })
        .collect();

    TotalsView {
        categories,
        grand_total: None,
    }
}

/// Parse a raw item amount; malformed or empty input counts as zero
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}
