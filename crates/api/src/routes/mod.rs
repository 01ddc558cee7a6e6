pub mod health;
pub mod overlay;
pub mod rtspme;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          readiness (GET)
///
/// /overlays/                                       list (?stream_id), create
/// /overlays/{id}                                   get, update, delete
/// /overlays/stream/{stream_id}                     delete all for stream
///
/// /rtspme/convert-rtsp                             convert RTSP URL (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::api_router())
        .merge(overlay::router())
        .merge(rtspme::router())
}
