use std::sync::Arc;

use rtspio_rtspme::RtspMeClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rtspio_db::DbPool,
    /// Server configuration, read-only after startup.
    pub config: Arc<ServerConfig>,
    /// RTSP.me client (pooled HTTP connections, fixed timeout).
    pub rtspme: Arc<RtspMeClient>,
}
