//! Error types for the budget planner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Service(String),

    #[error("{0}")]
    Transport(String),

    #[error("Not enough months calculated yet; calculate at least 2 months first")]
    MissingHistory,

    #[error("No server total calculated yet for this month")]
    NoGrandTotal,

    #[error("Invalid month key: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
