//! Planning session orchestration
//!
//! `Planner` ties the pieces together for one editing session: every
//! mutation goes through it so the totals view is recomputed synchronously
//! before the next read, item adds land in the focus mailbox, and
//! calculation results flow into the history. All state changes happen on
//! the caller's thread; the only suspension point is the calculation
//! service round trip, which is tagged with the month it targets so a stale
//! response can never overwrite a newer month's result.

use tracing::{debug, info};

use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::export::{export_budget, BudgetSheet};
use crate::focus::{FocusCoordinator, FocusTarget};
use crate::history::{History, MonthRecord};
use crate::month::MonthKey;
use crate::remote::CalcClient;
use crate::store::{Category, CategoryStore};
use crate::totals::{compute_totals, TotalsView};

/// One in-memory planning session
#[derive(Debug)]
pub struct Planner {
    config: PlannerConfig,
    store: CategoryStore,
    focus: FocusCoordinator,
    history: History,
    selected_month: MonthKey,
    totals: TotalsView,
    error_banner: Option<String>,
}

impl Planner {
    pub fn new(config: PlannerConfig, month: MonthKey) -> Self {
        let store = CategoryStore::new(&config.store.default_categories);
        let totals = compute_totals(&store.snapshot());
        Self {
            config,
            store,
            focus: FocusCoordinator::new(),
            history: History::new(),
            selected_month: month,
            totals,
            error_banner: None,
        }
    }

    // --- month selection -------------------------------------------------

    pub fn selected_month(&self) -> &MonthKey {
        &self.selected_month
    }

    /// Switch the session to a different month
    ///
    /// The grand total and error banner belong to the previous month, so
    /// both are cleared; category edits carry over unchanged.
    pub fn select_month(&mut self, month: MonthKey) {
        if month != self.selected_month {
            debug!("selecting month {month}");
            self.selected_month = month;
            self.totals.grand_total = None;
            self.error_banner = None;
        }
    }

    // --- store mutations --------------------------------------------------

    pub fn add_category(&mut self, name: &str) {
        self.store.add_category(name);
        self.recompute();
    }

    pub fn remove_category(&mut self, name: &str) {
        self.store.remove_category(name);
        self.recompute();
    }

    pub fn set_item(&mut self, name: &str, index: usize, value: &str) {
        self.store.set_item(name, index, value);
        self.recompute();
    }

    /// Add an empty item slot; the new slot becomes the pending focus target
    pub fn add_item(&mut self, name: &str) {
        if let Some(target) = self.store.add_item(name) {
            self.focus.set(target);
        }
        self.recompute();
    }

    pub fn remove_item(&mut self, name: &str, index: usize) {
        self.store.remove_item(name, index);
        self.recompute();
    }

    // --- derived state ----------------------------------------------------

    pub fn totals(&self) -> &TotalsView {
        &self.totals
    }

    pub fn categories(&self) -> &[Category] {
        self.store.categories()
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn currency(&self) -> &str {
        &self.config.display.currency
    }

    /// Consume the pending focus target, if any
    pub fn take_focus(&mut self) -> Option<FocusTarget> {
        self.focus.take()
    }

    /// The error banner to show, if any
    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    // --- calculation ------------------------------------------------------

    /// Snapshot the state a calculation request needs
    ///
    /// The returned month tags the request; `apply_calculation` uses it to
    /// discard responses for a month that is no longer selected.
    pub fn pending_calculation(&self) -> (MonthKey, TotalsView) {
        (self.selected_month.clone(), self.totals.clone())
    }

    /// Apply a successful calculation result
    ///
    /// Returns false when the response is stale (the session has moved to a
    /// different month); stale results are discarded without touching any
    /// state. Fresh results set the grand total, clear the error banner,
    /// and record the month in the history.
    pub fn apply_calculation(&mut self, month: MonthKey, total: f64) -> bool {
        if month != self.selected_month {
            info!("discarding stale calculation result for {month}");
            return false;
        }
        self.totals.grand_total = Some(total);
        self.error_banner = None;
        self.history.record(
            month,
            MonthRecord {
                snapshot: self.store.snapshot(),
                totals: self.totals.categories.clone(),
                grand_total: total,
            },
        );
        true
    }

    /// Surface a calculation failure as the error banner
    ///
    /// Only service and transport errors are user-visible; a failure for a
    /// month that is no longer selected is dropped.
    pub fn apply_calculation_error(&mut self, month: &MonthKey, error: &Error) {
        if *month != self.selected_month {
            info!("discarding stale calculation error for {month}");
            return;
        }
        if let Error::Service(message) | Error::Transport(message) = error {
            self.error_banner = Some(message.clone());
        }
    }

    /// Run one calculation round trip for the selected month
    ///
    /// Single-shot: no retry on failure. The result is applied through the
    /// stale-response policy above, so callers that interleave calls for
    /// different months get consistent state.
    pub async fn calculate(&mut self, client: &CalcClient) -> Result<f64> {
        let (month, totals) = self.pending_calculation();
        match client.calculate_month(&month, &totals).await {
            Ok(total) => {
                self.apply_calculation(month, total);
                Ok(total)
            }
            Err(error) => {
                self.apply_calculation_error(&month, &error);
                Err(error)
            }
        }
    }

    // --- export -----------------------------------------------------------

    /// Assemble the spreadsheet export for the selected month
    pub fn export(&self) -> Result<BudgetSheet> {
        export_budget(&self.selected_month, &self.totals, self.currency())
    }

    fn recompute(&mut self) {
        // Push-based: derive totals immediately so reads never see stale
        // sums. The grand total is authoritative-server state, not derived,
        // so it survives recomputation.
        let grand_total = self.totals.grand_total;
        self.totals = compute_totals(&self.store.snapshot());
        self.totals.grand_total = grand_total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> Planner {
        Planner::new(
            PlannerConfig::default(),
            MonthKey::parse("2026-08").unwrap(),
        )
    }

    fn month(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    #[test]
    fn test_totals_recompute_after_every_mutation() {
        let mut planner = planner();
        planner.add_category("Travel");
        planner.set_item("Travel", 0, "100");
        assert_eq!(planner.totals().get("Travel"), Some(100.0));

        planner.add_item("Travel");
        planner.set_item("Travel", 1, "50");
        assert_eq!(planner.totals().get("Travel"), Some(150.0));

        planner.remove_item("Travel", 0);
        assert_eq!(planner.totals().get("Travel"), Some(50.0));

        planner.remove_category("Travel");
        assert_eq!(planner.totals().get("Travel"), None);
    }

    #[test]
    fn test_add_item_sets_focus_target() {
        let mut planner = planner();
        planner.add_category("Food");
        planner.add_item("Food");
        let target = planner.take_focus().unwrap();
        assert_eq!(target.category, "Food");
        assert_eq!(target.index, 1);
        assert!(planner.take_focus().is_none());
    }

    #[test]
    fn test_apply_calculation_records_history() {
        let mut planner = planner();
        planner.set_item("Personal", 0, "42");
        let (month, _) = planner.pending_calculation();
        assert!(planner.apply_calculation(month.clone(), 42.0));
        assert_eq!(planner.totals().grand_total, Some(42.0));
        let record = planner.history().get(&month).unwrap();
        assert_eq!(record.grand_total, 42.0);
        assert_eq!(record.totals[0].name, "Personal");
    }

    #[test]
    fn test_stale_calculation_is_discarded() {
        let mut planner = planner();
        let (july, _) = {
            planner.select_month(month("2026-07"));
            planner.pending_calculation()
        };
        planner.select_month(month("2026-08"));
        assert!(!planner.apply_calculation(july, 99.0));
        assert_eq!(planner.totals().grand_total, None);
        assert!(planner.history().is_empty());
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let mut planner = planner();
        let july = month("2026-07");
        planner.apply_calculation_error(&july, &Error::Transport("nope".to_string()));
        assert!(planner.error_banner().is_none());
    }

    #[test]
    fn test_error_banner_only_for_service_and_transport() {
        let mut planner = planner();
        let current = planner.selected_month().clone();
        planner.apply_calculation_error(&current, &Error::MissingHistory);
        assert!(planner.error_banner().is_none());

        planner.apply_calculation_error(&current, &Error::Service("Budget exceeded".to_string()));
        assert_eq!(planner.error_banner(), Some("Budget exceeded"));
    }

    #[test]
    fn test_select_month_clears_grand_total_and_banner() {
        let mut planner = planner();
        let current = planner.selected_month().clone();
        planner.apply_calculation(current.clone(), 10.0);
        planner.apply_calculation_error(&current, &Error::Service("oops".to_string()));
        planner.select_month(month("2026-09"));
        assert_eq!(planner.totals().grand_total, None);
        assert!(planner.error_banner().is_none());
    }

    #[test]
    fn test_grand_total_survives_edits_within_month() {
        let mut planner = planner();
        let current = planner.selected_month().clone();
        planner.apply_calculation(current, 10.0);
        planner.set_item("Personal", 0, "5");
        assert_eq!(planner.totals().grand_total, Some(10.0));
    }

    #[test]
    fn test_export_uses_authoritative_total() {
        let mut planner = planner();
        planner.add_category("Travel");
        planner.remove_category("Personal");
        planner.set_item("Travel", 0, "100");
        planner.add_item("Travel");
        planner.set_item("Travel", 1, "50");
        let current = planner.selected_month().clone();
        planner.apply_calculation(current, 150.0);

        let sheet = planner.export().unwrap();
        assert_eq!(sheet.file_name, "Budget-August-2026.xlsx");
        assert_eq!(sheet.rows[0].category, "Travel");
        assert_eq!(sheet.rows[0].amount, "$150.00");
        assert_eq!(sheet.rows.last().unwrap().category, "Total");
        assert_eq!(sheet.rows.last().unwrap().amount, "$150.00");
    }

    #[test]
    fn test_export_refused_before_calculation() {
        let planner = planner();
        assert!(matches!(planner.export(), Err(Error::NoGrandTotal)));
    }
}
