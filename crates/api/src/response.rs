//! Response bodies shared by the API handlers.
//!
//! Every successful response carries `"success": true` next to its payload;
//! failures are rendered by [`crate::error::AppError`] with `"success": false`.

use serde::Serialize;
use rtspio_db::models::overlay::Overlay;

/// `GET /api/overlays/` body.
#[derive(Debug, Serialize)]
pub struct OverlayListResponse {
    pub success: bool,
    pub overlays: Vec<Overlay>,
    pub count: usize,
}

/// Single-overlay body, with an optional confirmation message for mutations.
#[derive(Debug, Serialize)]
pub struct OverlayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub overlay: Overlay,
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    /// Rows removed, reported by bulk deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}
