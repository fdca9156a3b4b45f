//! Planner CLI - Monthly budget planning at the terminal
//!
//! Usage:
//!   planner plan                       Plan the current month interactively
//!   planner plan --month 2026-08       Plan a specific month
//!   planner config                     Show the resolved configuration

mod cli;
mod commands;
mod session;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Plan {
            month,
            base_url,
            currency,
        } => {
            commands::cmd_plan(
                cli.config.as_deref(),
                month.as_deref(),
                base_url.as_deref(),
                currency.as_deref(),
            )
            .await
        }
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}
