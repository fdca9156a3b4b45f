//! Month keys
//!
//! A month is addressed by a zero-padded `YYYY-MM` string. Lexicographic
//! order on the key matches chronological order, which is what the summary
//! view relies on when it picks the two most recent months.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Validated `YYYY-MM` month identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// Parse and validate a `YYYY-MM` string
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        // Pin to the first of the month so chrono can validate it as a date.
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|_| Error::InvalidMonth(s.to_string()))?;
        if s.len() != 7 {
            return Err(Error::InvalidMonth(s.to_string()));
        }
        Ok(Self(date.format("%Y-%m").to_string()))
    }

    /// The raw `YYYY-MM` key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name, e.g. "August 2026"
    pub fn display_name(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Name used in export file names, e.g. "August-2026"
    pub fn file_label(&self) -> String {
        self.first_day().format("%B-%Y").to_string()
    }

    fn first_day(&self) -> NaiveDate {
        // The key was validated at construction.
        NaiveDate::parse_from_str(&format!("{}-01", self.0), "%Y-%m-%d")
            .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}
