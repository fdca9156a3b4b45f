//! Calculation service client
//!
//! The single network boundary of the planner. Sends the selected month and
//! its per-category totals to the external calculation service and returns
//! the authoritative grand total. Single-shot: no retries, no polling;
//! failures are surfaced to the caller.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::month::MonthKey;
use crate::totals::TotalsView;

/// Error message for a non-OK service response carrying no message of its own
pub const GENERIC_SERVICE_ERROR: &str = "Something went wrong";

/// Error message for transport failures and unparsable responses
pub const TRANSPORT_ERROR: &str = "Cannot connect to the backend";

/// HTTP client for the calculation service
#[derive(Debug, Clone)]
pub struct CalcClient {
    http_client: Client,
    base_url: String,
}

/// Request body for POST /calculate
#[derive(Debug, Serialize)]
struct CalcRequest {
    month: String,
    categories: BTreeMap<String, f64>,
}

/// Success response from the calculation service
#[derive(Debug, Deserialize)]
struct CalcResponse {
    total: f64,
}

/// Error response from the calculation service
#[derive(Debug, Deserialize)]
struct CalcErrorResponse {
    error: Option<String>,
}

impl CalcClient {
    /// Create a client for the service at `base_url` with a request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Ask the service for the authoritative total of one month
    ///
    /// Returns `Error::Service` with the service's own message (or a generic
    /// fallback) when it reports failure, and `Error::Transport` when it is
    /// unreachable or its response cannot be parsed.
    pub async fn calculate_month(&self, month: &MonthKey, totals: &TotalsView) -> Result<f64> {
        let request = CalcRequest {
            month: month.as_str().to_string(),
            categories: totals.to_map(),
        };

        let response = match self
            .http_client
            .post(format!("{}/calculate", self.base_url))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("calculation service unreachable: {e}");
                return Err(Error::Transport(TRANSPORT_ERROR.to_string()));
            }
        };

        if response.status().is_success() {
            let body: CalcResponse = response
                .json()
                .await
                .map_err(|_| Error::Transport(TRANSPORT_ERROR.to_string()))?;
            debug!("calculation service total for {month}: {}", body.total);
            return Ok(body.total);
        }

        let message = response
            .json::<CalcErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
        Err(Error::Service(message))
    }
}
