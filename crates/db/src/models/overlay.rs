//! Overlay model.
//!
//! Serialized field names follow the wire shape clients already consume:
//! `_id`, `stream_id`, and camelCase `zIndex` / `createdAt` / `updatedAt`.

use serde::Serialize;
use sqlx::FromRow;
use rtspio_core::types::{OverlayId, Timestamp};

/// A row from the `overlays` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Overlay {
    #[serde(rename = "_id")]
    pub id: OverlayId,
    pub stream_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub overlay_type: serde_json::Value,
    pub content: serde_json::Value,
    pub position: serde_json::Value,
    pub size: serde_json::Value,
    #[serde(rename = "zIndex")]
    pub z_index: serde_json::Value,
    pub visible: serde_json::Value,
    pub style: serde_json::Value,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}
