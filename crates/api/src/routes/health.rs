use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response payload.
#[derive(Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Readiness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    /// `connected` or `disconnected`.
    pub database: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET / -- the process is up.
async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "healthy",
        message: "RTSP.io API is running",
    })
}

/// GET /api/health -- service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match rtspio_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        database: if db_healthy { "connected" } else { "disconnected" },
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Root-level liveness route (not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(liveness))
}

/// Readiness route, merged into `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
