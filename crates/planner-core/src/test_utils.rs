//! Test utilities for planner-core
//!
//! Provides a mock calculation server that speaks the external service's
//! wire format, for integration tests and local development.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// How the mock server answers /calculate
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Respond with the sum of the submitted category totals
    SumCategories,
    /// Respond with a fixed total regardless of input
    FixedTotal(f64),
    /// Respond with a non-OK status and an optional error message
    ServiceError {
        status: u16,
        message: Option<String>,
    },
    /// Respond 200 with a body that is not valid JSON
    MalformedBody,
}

/// Mock calculation server for testing
pub struct MockCalcServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCalcServer {
    /// Start a server that sums the submitted category totals
    pub async fn start() -> Self {
        Self::start_with(MockBehavior::SumCategories).await
    }

    /// Start a server with the given behavior on an available port
    pub async fn start_with(behavior: MockBehavior) -> Self {
        let app = Router::new()
            .route("/calculate", post(handle_calculate))
            .with_state(behavior);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCalcServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Calculation request as the service receives it
#[derive(Debug, Deserialize)]
struct CalculateRequest {
    #[allow(dead_code)]
    month: String,
    categories: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
struct CalculateResponse {
    total: f64,
}

#[derive(Debug, Serialize)]
struct CalculateError {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn handle_calculate(
    State(behavior): State<MockBehavior>,
    Json(request): Json<CalculateRequest>,
) -> Response {
    match behavior {
        MockBehavior::SumCategories => {
            let total = request.categories.values().sum();
            Json(CalculateResponse { total }).into_response()
        }
        MockBehavior::FixedTotal(total) => Json(CalculateResponse { total }).into_response(),
        MockBehavior::ServiceError { status, message } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
            (status, Json(CalculateError { error: message })).into_response()
        }
        MockBehavior::MalformedBody => {
            (StatusCode::OK, "not json at all".to_string()).into_response()
        }
    }
}
