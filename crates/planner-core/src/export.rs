//! Spreadsheet export
//!
//! Assembles the two-column (Category, Amount) budget sheet: one row per
//! category in display order, then a trailing Total row from the
//! server-confirmed grand total. The xlsx encoding itself is an external
//! collaborator; this module produces the rows, their CSV rendering, and the
//! `Budget-<Month>-<Year>.xlsx` file name.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::month::MonthKey;
use crate::totals::TotalsView;

/// One row of the exported budget sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

/// Assembled export: file name, rows, and their CSV rendering
#[derive(Debug, Clone)]
pub struct BudgetSheet {
    pub file_name: String,
    pub rows: Vec<SheetRow>,
    pub csv: String,
}

/// Format an amount with the currency prefix and two decimal places
pub fn format_amount(currency: &str, amount: f64) -> String {
    format!("{currency}{amount:.2}")
}

/// File name for a month's export, e.g. `Budget-August-2026.xlsx`
pub fn export_file_name(month: &MonthKey) -> String {
    format!("Budget-{}.xlsx", month.file_label())
}

/// Build the sheet rows for a totals view
///
/// Refuses with `Error::NoGrandTotal` until a calculation for the month has
/// succeeded; the Total row is always the authoritative server value, never
/// the local sum.
pub fn budget_rows(totals: &TotalsView, currency: &str) -> Result<Vec<SheetRow>> {
    let grand_total = totals.grand_total.ok_or(Error::NoGrandTotal)?;

    let mut rows: Vec<SheetRow> = totals
        .categories
        .iter()
        .map(|category| SheetRow {
            category: category.name.clone(),
            amount: format_amount(currency, category.total),
        })
        .collect();

    rows.push(SheetRow {
        category: "Total".to_string(),
        amount: format_amount(currency, grand_total),
    });

    Ok(rows)
}

/// Render rows as CSV with a Category,Amount header
pub fn render_sheet(rows: &[SheetRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Io(std::io::Error::other(e)))
}

/// Assemble the full export for one month
pub fn export_budget(month: &MonthKey, totals: &TotalsView, currency: &str) -> Result<BudgetSheet> {
    let rows = budget_rows(totals, currency)?;
    let csv = render_sheet(&rows)?;
    Ok(BudgetSheet {
        file_name: export_file_name(month),
        rows,
        csv,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::CategoryTotal;

    fn totals(entries: &[(&str, f64)], grand_total: Option<f64>) -> TotalsView {
        TotalsView {
            categories: entries
                .iter()
                .map(|(name, total)| CategoryTotal {
                    name: name.to_string(),
                    total: *total,
                })
                .collect(),
            grand_total,
        }
    }

    #[test]
    fn test_rows_end_with_total() {
        let rows = budget_rows(&totals(&[("Travel", 150.0)], Some(150.0)), "$").unwrap();
        assert_eq!(
            rows,
            vec![
                SheetRow {
                    category: "Travel".to_string(),
                    amount: "$150.00".to_string(),
                },
                SheetRow {
                    category: "Total".to_string(),
                    amount: "$150.00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_export_refused_without_grand_total() {
        let err = budget_rows(&totals(&[("Travel", 150.0)], None), "$").unwrap_err();
        assert!(matches!(err, Error::NoGrandTotal));
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount("$", 7.5), "$7.50");
        assert_eq!(format_amount("€", 1234.567), "€1234.57");
        assert_eq!(format_amount("$", 0.0), "$0.00");
    }

    #[test]
    fn test_file_name_from_month() {
        let month = MonthKey::parse("2026-08").unwrap();
        assert_eq!(export_file_name(&month), "Budget-August-2026.xlsx");
    }

    #[test]
    fn test_csv_rendering() {
        let sheet = export_budget(
            &MonthKey::parse("2026-08").unwrap(),
            &totals(&[("Food", 10.0), ("Rent", 20.0)], Some(30.0)),
            "$",
        )
        .unwrap();
        assert_eq!(
            sheet.csv,
            "Category,Amount\nFood,$10.00\nRent,$20.00\nTotal,$30.00\n"
        );
    }
}
