//! Planner configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override in the user config dir
//!    (e.g. ~/.config/budget-planner/planner.toml)
//! 2. Fall back to embedded defaults (compiled into the binary)
//!
//! The default category layout lives here as named configuration rather than
//! as an inline literal, so tests can assert against it directly.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/planner.toml");

/// Full planner configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Calculation service settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the external calculation service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds for the /calculate call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Formatting settings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Currency symbol prefix; formatting only, never affects computation
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Category store settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Layout the store resets to when its last category is removed
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_categories() -> Vec<String> {
    vec!["Personal".to_string()]
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_categories: default_categories(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        // The embedded config is validated by tests.
        toml::from_str(DEFAULT_CONFIG).unwrap_or(Self {
            service: ServiceConfig::default(),
            display: DisplayConfig::default(),
            store: StoreConfig::default(),
        })
    }
}

impl PlannerConfig {
    /// Load config: override file if present, embedded defaults otherwise
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::override_path() {
            if path.exists() {
                debug!("loading config override from {}", path.display());
                return Self::from_path(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Location of the optional override file
    pub fn override_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("budget-planner").join("planner.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }
}
