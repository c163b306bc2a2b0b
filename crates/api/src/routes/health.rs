//! Liveness and store reachability.

use std::time::Duration;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Upper bound on the store probe; kept below any sane request timeout.
const STORE_PING_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store did not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Always 200; a slow or failing store only flips `dbHealthy`.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match tokio::time::timeout(STORE_PING_TIMEOUT, state.store.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Detection store ping failed");
            false
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = STORE_PING_TIMEOUT.as_millis() as u64,
                "Detection store ping timed out",
            );
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
