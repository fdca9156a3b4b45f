//! CLI command implementations

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use planner_core::{CalcClient, MonthKey, Planner, PlannerConfig};
use tracing::debug;

use crate::session::run_session;

/// Resolve config from an explicit path, the override file, or built-ins
fn load_config(config_path: Option<&Path>) -> Result<PlannerConfig> {
    match config_path {
        Some(path) => PlannerConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => PlannerConfig::load().context("failed to load config"),
    }
}

/// Start an interactive planning session on stdin/stdout
pub async fn cmd_plan(
    config_path: Option<&Path>,
    month: Option<&str>,
    base_url: Option<&str>,
    currency: Option<&str>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(base_url) = base_url {
        config.service.base_url = base_url.to_string();
    }
    if let Some(currency) = currency {
        config.display.currency = currency.to_string();
    }

    let month = match month {
        Some(raw) => MonthKey::parse(raw)?,
        None => current_month(),
    };
    debug!("starting session for {month} against {}", config.service.base_url);

    let client = CalcClient::new(&config.service.base_url, config.timeout())?;
    let mut planner = Planner::new(config, month);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run_session(&mut planner, &client, &mut input, &mut out).await
}

/// Show the resolved configuration
pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    println!();
    println!("📊 Planner Config");
    println!("   Service URL: {}", config.service.base_url);
    println!("   Timeout: {}s", config.service.timeout_secs);
    println!("   Currency: {}", config.display.currency);
    println!(
        "   Default categories: {}",
        config.store.default_categories.join(", ")
    );
    match PlannerConfig::override_path() {
        Some(path) if config_path.is_none() => {
            let status = if path.exists() { "in use" } else { "not present" };
            println!("   Override file: {} ({status})", path.display());
        }
        _ => {}
    }
    println!();
    Ok(())
}

/// The month containing today, as the default selection
fn current_month() -> MonthKey {
    let key = Utc::now().format("%Y-%m").to_string();
    // Always a valid zero-padded key.
    MonthKey::parse(&key).unwrap_or_else(|_| MonthKey::parse("1970-01").unwrap())
}

/// Run a session over explicit streams (used by tests)
#[cfg_attr(not(test), allow(dead_code))]
pub async fn run_scripted_session<R: BufRead>(
    planner: &mut Planner,
    client: &CalcClient,
    input: &mut R,
) -> Result<String> {
    let mut out = Vec::new();
    run_session(planner, client, input, &mut out).await?;
    Ok(String::from_utf8(out)?)
}
