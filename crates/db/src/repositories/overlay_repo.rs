//! Repository for the `overlays` table.

use rtspio_core::overlay::{CreateOverlay, UpdateOverlay};
use rtspio_core::types::OverlayId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::overlay::Overlay;

/// Column list for overlays queries.
const COLUMNS: &str = "id, stream_id, \"type\", content, position, size, \
    z_index, visible, style, created_at, updated_at";

/// Store adapter for overlays.
///
/// Identifiers arrive as the raw strings clients send; they are parsed here
/// so a malformed id is reported as [`StoreError::InvalidId`] before any
/// database round-trip.
pub struct OverlayRepo;

impl OverlayRepo {
    /// Parse a client-supplied overlay identifier.
    pub fn parse_id(raw: &str) -> Result<OverlayId, StoreError> {
        OverlayId::parse_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
    }

    /// List all overlays for a stream, oldest first.
    pub async fn list_by_stream(
        pool: &PgPool,
        stream_id: &str,
    ) -> Result<Vec<Overlay>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM overlays
             WHERE stream_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        let overlays = sqlx::query_as::<_, Overlay>(&query)
            .bind(stream_id)
            .fetch_all(pool)
            .await?;
        Ok(overlays)
    }

    /// Find an overlay by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Overlay, StoreError> {
        let overlay_id = Self::parse_id(id)?;
        let query = format!("SELECT {COLUMNS} FROM overlays WHERE id = $1");
        sqlx::query_as::<_, Overlay>(&query)
            .bind(overlay_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Insert a new overlay, returning the stored row.
    pub async fn create(pool: &PgPool, input: &CreateOverlay) -> Result<Overlay, StoreError> {
        let query = format!(
            "INSERT INTO overlays
                (id, stream_id, \"type\", content, position, size, z_index, visible, style,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
             RETURNING {COLUMNS}"
        );
        let overlay = sqlx::query_as::<_, Overlay>(&query)
            .bind(OverlayId::now_v7())
            .bind(&input.stream_id)
            .bind(&input.overlay_type)
            .bind(&input.content)
            .bind(&input.position)
            .bind(&input.size)
            .bind(&input.z_index)
            .bind(&input.visible)
            .bind(&input.style)
            .fetch_one(pool)
            .await?;
        Ok(overlay)
    }

    /// Apply a partial update. Only supplied fields change; `updated_at` is
    /// refreshed even when the patch is empty.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateOverlay,
    ) -> Result<Overlay, StoreError> {
        let overlay_id = Self::parse_id(id)?;
        let query = format!(
            "UPDATE overlays SET
                \"type\" = COALESCE($2, \"type\"),
                content = COALESCE($3, content),
                position = COALESCE($4, position),
                size = COALESCE($5, size),
                z_index = COALESCE($6, z_index),
                visible = COALESCE($7, visible),
                style = COALESCE($8, style),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Overlay>(&query)
            .bind(overlay_id)
            .bind(&input.overlay_type)
            .bind(&input.content)
            .bind(&input.position)
            .bind(&input.size)
            .bind(&input.z_index)
            .bind(&input.visible)
            .bind(&input.style)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Delete an overlay. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, StoreError> {
        let overlay_id = Self::parse_id(id)?;
        let result = sqlx::query("DELETE FROM overlays WHERE id = $1")
            .bind(overlay_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every overlay belonging to a stream, returning how many went.
    pub async fn delete_by_stream(pool: &PgPool, stream_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM overlays WHERE stream_id = $1")
            .bind(stream_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
