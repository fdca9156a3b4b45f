//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Planner - Monthly budget planning at the terminal
#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Plan monthly expenses by category", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to the user config dir, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive planning session
    Plan {
        /// Month to plan (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Calculation service base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Currency symbol for display (overrides config)
        #[arg(long)]
        currency: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}
