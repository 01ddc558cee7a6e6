//! Handlers for overlay CRUD.
//!
//! Overlays are listed and bulk-deleted by stream id and addressed
//! individually by their UUID. A malformed id answers 400, an unknown one 404.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use rtspio_core::overlay::{check_stream_id, CreateOverlay, UpdateOverlay, DEFAULT_STREAM_ID};
use rtspio_db::repositories::OverlayRepo;
use rtspio_db::StoreError;

use crate::error::AppResult;
use crate::handlers::require_json;
use crate::query::StreamQuery;
use crate::response::{MessageResponse, OverlayListResponse, OverlayResponse};
use crate::state::AppState;

/// GET /overlays/?stream_id=
///
/// List every overlay of a stream (default stream when omitted).
pub async fn list_overlays(
    State(state): State<AppState>,
    Query(params): Query<StreamQuery>,
) -> AppResult<impl IntoResponse> {
    let stream_id = params
        .stream_id
        .unwrap_or_else(|| DEFAULT_STREAM_ID.to_string());
    check_stream_id(&stream_id)?;

    let overlays = OverlayRepo::list_by_stream(&state.pool, &stream_id).await?;
    let count = overlays.len();

    Ok(Json(OverlayListResponse {
        success: true,
        overlays,
        count,
    }))
}

/// GET /overlays/{id}
pub async fn get_overlay(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let overlay = OverlayRepo::find_by_id(&state.pool, &id).await?;
    Ok(Json(OverlayResponse {
        success: true,
        message: None,
        overlay,
    }))
}

/// POST /overlays/
///
/// Requires `type`, `content`, `position` and `size`; the rest defaults.
pub async fn create_overlay(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let body = require_json(body)?;
    let input = CreateOverlay::from_json(&body)?;

    let overlay = OverlayRepo::create(&state.pool, &input).await?;

    tracing::info!(
        overlay_id = %overlay.id,
        stream_id = %overlay.stream_id,
        overlay_type = %overlay.overlay_type,
        "Overlay created"
    );

    Ok((
        StatusCode::CREATED,
        Json(OverlayResponse {
            success: true,
            message: Some("Overlay created successfully"),
            overlay,
        }),
    ))
}

/// PUT /overlays/{id}
///
/// Partial update: only supplied fields change, `updatedAt` always moves.
pub async fn update_overlay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    // Reject a malformed id before looking at the body.
    OverlayRepo::parse_id(&id)?;

    let body = require_json(body)?;
    let input = UpdateOverlay::from_json(&body)?;

    let overlay = OverlayRepo::update(&state.pool, &id, &input).await?;

    tracing::info!(overlay_id = %overlay.id, "Overlay updated");

    Ok(Json(OverlayResponse {
        success: true,
        message: Some("Overlay updated successfully"),
        overlay,
    }))
}

/// DELETE /overlays/{id}
pub async fn delete_overlay(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = OverlayRepo::delete(&state.pool, &id).await?;
    if deleted == 0 {
        return Err(StoreError::NotFound(id).into());
    }

    tracing::info!(overlay_id = %id, "Overlay deleted");

    Ok(Json(MessageResponse {
        success: true,
        message: "Overlay deleted successfully".to_string(),
        count: None,
    }))
}

/// DELETE /overlays/stream/{stream_id}
///
/// Remove every overlay of a stream. Zero matches is not an error.
pub async fn delete_stream_overlays(
    State(state): State<AppState>,
    Path(stream_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    check_stream_id(&stream_id)?;
    let count = OverlayRepo::delete_by_stream(&state.pool, &stream_id).await?;

    tracing::info!(stream_id = %stream_id, count, "Stream overlays deleted");

    Ok(Json(MessageResponse {
        success: true,
        message: format!("Deleted {count} overlays for stream {stream_id}"),
        count: Some(count),
    }))
}
