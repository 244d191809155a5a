//! Liveness and readiness probe at `/health`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub conflict_detection: ConflictDetectionInfo,
}

/// Detector settings in effect, so operators can confirm the configured
/// nominal window without reading the environment.
#[derive(Debug, Serialize)]
pub struct ConflictDetectionInfo {
    pub nominal_window_mins: i64,
}

/// GET /health
///
/// Returns 503 when the database is unreachable: scene saves and conflict
/// checks both need it, so the instance is not ready to serve.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match slate_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check: database unreachable");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        conflict_detection: ConflictDetectionInfo {
            nominal_window_mins: state.config.duration_policy.nominal_window_mins,
        },
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
