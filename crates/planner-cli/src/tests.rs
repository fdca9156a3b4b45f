//! CLI session tests
//!
//! Scripted sessions drive the interactive loop against the mock
//! calculation server and assert on the rendered output.

use std::io::Cursor;
use std::path::PathBuf;

use planner_core::test_utils::{MockBehavior, MockCalcServer};
use planner_core::{CalcClient, MonthKey, Planner, PlannerConfig};

use crate::commands::run_scripted_session;
use crate::session::SessionCommand;

fn planner_for(month: &str) -> Planner {
    Planner::new(PlannerConfig::default(), MonthKey::parse(month).unwrap())
}

fn client_for(server: &MockCalcServer) -> CalcClient {
    CalcClient::new(&server.url(), std::time::Duration::from_secs(5)).unwrap()
}

async fn run_script(planner: &mut Planner, client: &CalcClient, script: &str) -> String {
    let mut input = Cursor::new(script.to_string());
    run_scripted_session(planner, client, &mut input).await.unwrap()
}

// ========== Command Parsing ==========

#[test]
fn test_parse_simple_commands() {
    assert_eq!(SessionCommand::parse("help"), Ok(SessionCommand::Help));
    assert_eq!(SessionCommand::parse("show"), Ok(SessionCommand::Show));
    assert_eq!(SessionCommand::parse("quit"), Ok(SessionCommand::Quit));
    assert_eq!(SessionCommand::parse("calc"), Ok(SessionCommand::Calculate));
    assert_eq!(
        SessionCommand::parse("month 2026-09"),
        Ok(SessionCommand::Month("2026-09".to_string()))
    );
}

#[test]
fn test_parse_category_names_with_spaces() {
    assert_eq!(
        SessionCommand::parse("add Eating Out"),
        Ok(SessionCommand::AddCategory("Eating Out".to_string()))
    );
    assert_eq!(
        SessionCommand::parse("set Eating Out 2 12.50"),
        Ok(SessionCommand::SetItem {
            category: "Eating Out".to_string(),
            index: 2,
            value: "12.50".to_string(),
        })
    );
    assert_eq!(
        SessionCommand::parse("del Eating Out 0"),
        Ok(SessionCommand::RemoveItem {
            category: "Eating Out".to_string(),
            index: 0,
        })
    );
}

#[test]
fn test_parse_export_with_and_without_dir() {
    assert_eq!(
        SessionCommand::parse("export"),
        Ok(SessionCommand::Export(None))
    );
    assert_eq!(
        SessionCommand::parse("export /tmp/budgets"),
        Ok(SessionCommand::Export(Some(PathBuf::from("/tmp/budgets"))))
    );
}

#[test]
fn test_parse_rejects_bad_input() {
    assert!(SessionCommand::parse("set Food x 10").is_err());
    assert!(SessionCommand::parse("set Food").is_err());
    assert!(SessionCommand::parse("del Food").is_err());
    assert!(SessionCommand::parse("month").is_err());
    assert!(SessionCommand::parse("frobnicate").is_err());
}

// ========== Scripted Sessions ==========

#[tokio::test]
async fn test_session_builds_and_calculates_budget() {
    let server = MockCalcServer::start().await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-08");

    let script = "add Travel\nrm Personal\nset Travel 0 100\nitem Travel\n50\n\ncalc\nquit\n";
    let output = run_script(&mut planner, &client, script).await;

    assert_eq!(planner.totals().get("Travel"), Some(150.0));
    assert!(output.contains("✅ August 2026 Total: $150.00"));
}

#[tokio::test]
async fn test_item_entry_ends_on_empty_line_without_leftover_slot() {
    let server = MockCalcServer::start().await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-08");

    let script = "set Personal 0 10\nitem Personal\n20\n30\n\nquit\n";
    run_script(&mut planner, &client, script).await;

    let items = &planner.categories()[0].items;
    assert_eq!(items, &vec!["10", "20", "30"]);
    assert_eq!(planner.totals().get("Personal"), Some(60.0));
}

#[tokio::test]
async fn test_session_shows_service_error_banner() {
    let server = MockCalcServer::start_with(MockBehavior::ServiceError {
        status: 400,
        message: Some("Budget exceeded".to_string()),
    })
    .await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-08");

    let output = run_script(&mut planner, &client, "calc\nquit\n").await;
    assert!(output.contains("❌ Budget exceeded"));
}

#[tokio::test]
async fn test_session_export_requires_calculated_total() {
    let server = MockCalcServer::start().await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-08");

    let output = run_script(&mut planner, &client, "export\nquit\n").await;
    assert!(output.contains("Calculate the month before exporting"));
}

#[tokio::test]
async fn test_session_export_writes_sheet() {
    let server = MockCalcServer::start().await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-08");
    let dir = tempfile::tempdir().unwrap();

    let script = format!(
        "set Personal 0 42\ncalc\nexport {}\nquit\n",
        dir.path().display()
    );
    let output = run_script(&mut planner, &client, &script).await;
    assert!(output.contains("Budget-August-2026.xlsx"));

    let written = std::fs::read_to_string(dir.path().join("Budget-August-2026.csv")).unwrap();
    assert_eq!(written, "Category,Amount\nPersonal,$42.00\nTotal,$42.00\n");
}

#[tokio::test]
async fn test_session_compare_needs_two_months() {
    let server = MockCalcServer::start().await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-08");

    let output = run_script(&mut planner, &client, "compare\nquit\n").await;
    assert!(output.contains("Not enough months calculated yet"));
}

#[tokio::test]
async fn test_session_compare_two_calculated_months() {
    let server = MockCalcServer::start().await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-07");

    let script = "set Personal 0 10\ncalc\nmonth 2026-08\nset Personal 0 25\ncalc\ncompare\nquit\n";
    let output = run_script(&mut planner, &client, script).await;

    assert!(output.contains("📊 2026-07 vs 2026-08"));
    assert!(output.contains("🧾 Category-wise Spending (2026-08)"));
    assert!(output.contains("Personal: $25.00"));
}

#[tokio::test]
async fn test_session_switch_month_clears_server_total() {
    let server = MockCalcServer::start().await;
    let client = client_for(&server);
    let mut planner = planner_for("2026-08");

    let script = "set Personal 0 10\ncalc\nmonth 2026-09\nshow\nquit\n";
    let output = run_script(&mut planner, &client, script).await;

    assert!(output.contains("📅 Planning September 2026"));
    // Only one server-total line: the August calculation, none after the switch.
    assert_eq!(output.matches("✅ Server total").count(), 0);
    assert_eq!(planner.totals().grand_total, None);
}
