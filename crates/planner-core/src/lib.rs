//! Budget Planner Core Library
//!
//! Shared functionality for the monthly budget planner:
//! - Ordered category store with raw line-item amounts
//! - Pure totals derivation (recomputed on every mutation)
//! - Calculation service client (the single network boundary)
//! - Month-to-month comparison assembly for charting
//! - Focus coordination for dynamically growing input lists
//! - Spreadsheet-row export with currency formatting
//! - Config with embedded defaults and an optional override file

pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod focus;
pub mod history;
pub mod month;
pub mod planner;
pub mod remote;
pub mod store;
pub mod totals;

/// Test utilities including the mock calculation server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use compare::{assemble_comparison, ComparisonSeries};
pub use config::{DisplayConfig, PlannerConfig, ServiceConfig, StoreConfig};
pub use error::{Error, Result};
pub use export::{export_budget, export_file_name, format_amount, BudgetSheet, SheetRow};
pub use focus::{FocusCoordinator, FocusTarget};
pub use history::{History, MonthRecord};
pub use month::MonthKey;
pub use planner::Planner;
pub use remote::{CalcClient, GENERIC_SERVICE_ERROR, TRANSPORT_ERROR};
pub use store::{Category, CategorySnapshot, CategoryStore};
pub use totals::{compute_totals, parse_amount, CategoryTotal, TotalsView};
