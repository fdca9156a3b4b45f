//! Month-to-month comparison assembly
//!
//! Builds the aligned label/series structure a bar chart needs from two
//! recorded months. A month with no record contributes an empty category
//! set; absent categories read as zero in that month's series. Label order
//! is first-seen across month A then month B, so identical inputs always
//! produce identical output.

use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::month::MonthKey;

/// Aligned chart data for two months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub month_a: MonthKey,
    pub month_b: MonthKey,
    /// Union of category names across both months, first-seen order
    pub labels: Vec<String>,
    /// Month A totals aligned to `labels`
    pub series_a: Vec<f64>,
    /// Month B totals aligned to `labels`
    pub series_b: Vec<f64>,
}

/// Assemble comparison data for two months from the history
pub fn assemble_comparison(
    month_a: &MonthKey,
    month_b: &MonthKey,
    history: &History,
) -> ComparisonSeries {
    let totals_a = month_totals(month_a, history);
    let totals_b = month_totals(month_b, history);

    let mut labels: Vec<String> = Vec::new();
    for (name, _) in totals_a.iter().chain(totals_b.iter()) {
        if !labels.iter().any(|l| l == name) {
            labels.push(name.clone());
        }
    }

    let series_a = aligned_series(&labels, &totals_a);
    let series_b = aligned_series(&labels, &totals_b);

    ComparisonSeries {
        month_a: month_a.clone(),
        month_b: month_b.clone(),
        labels,
        series_a,
        series_b,
    }
}

fn month_totals(month: &MonthKey, history: &History) -> Vec<(String, f64)> {
    history
        .get(month)
        .map(|record| {
            record
                .totals
                .iter()
                .map(|t| (t.name.clone(), t.total))
                .collect()
        })
        .unwrap_or_default()
}

fn aligned_series(labels: &[String], totals: &[(String, f64)]) -> Vec<f64> {
    labels
        .iter()
        .map(|label| {
            totals
                .iter()
                .find(|(name, _)| name == label)
                .map_or(0.0, |(_, total)| *total)
        })
        .collect()
}
