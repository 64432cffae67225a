//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub upstream: String,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks that the management API answers at all.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let (status, upstream) = match state.client.ping().await {
        Ok(code) => ("ok", format!("reachable ({code})")),
        Err(e) => {
            tracing::warn!(error = %e, "Upstream health check failed");
            ("degraded", format!("error: {e}"))
        }
    };

    ApiResponse::success(HealthStatus {
        status: status.to_string(),
        upstream,
    })
}
