//! Handler for converting RTSP camera URLs into RTSP.me embeds.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rtspio_core::rtsp::{validate_rtsp_url, DEFAULT_STREAM_NAME};
use rtspio_rtspme::ConvertRequest;

use crate::error::{AppError, AppResult};
use crate::handlers::require_json;
use crate::state::AppState;

const EMBED_NOTE: &str =
    "Standard RTSP.me embed URL generated. Each RTSP URL will play its specific video content.";

/// Request body for `POST /rtspme/convert-rtsp`.
#[derive(Debug, Deserialize)]
pub struct ConvertRtspRequest {
    pub rtsp_url: Option<String>,
    pub name: Option<String>,
    /// Client IP RTSP.me should restrict playback to.
    pub ip: Option<String>,
}

/// Embed metadata returned to the caller. Credentials never appear here.
#[derive(Debug, Serialize)]
pub struct ConvertRtspResponse {
    pub success: bool,
    pub rtsp_url: String,
    pub stream_id: String,
    pub name: Value,
    pub embed_url: String,
    pub access_url: Value,
    pub stream_url: Value,
    pub poster_url: Value,
    pub monthly_counter: Value,
    pub iframe_code: String,
    pub note: &'static str,
}

/// POST /rtspme/convert-rtsp
///
/// Checks the integration is configured, validates the RTSP URL, then makes
/// exactly one call to RTSP.me.
pub async fn convert_rtsp(
    State(state): State<AppState>,
    body: Result<Json<ConvertRtspRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let credentials = state.config.rtspme.credentials().ok_or_else(|| {
        AppError::NotConfigured(
            "Set RTSPME_EMAIL and RTSPME_PASSWORD environment variables".to_string(),
        )
    })?;

    let input = require_json(body)?;
    let rtsp_url = validate_rtsp_url(input.rtsp_url.as_deref())?;
    let name = input
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(DEFAULT_STREAM_NAME);
    let ip = input.ip.as_deref().filter(|ip| !ip.trim().is_empty());

    let request = ConvertRequest { rtsp_url, name, ip };
    let embed = state.rtspme.convert(&credentials, &request).await?;

    tracing::info!(
        stream_id = %embed.stream_id,
        name = %embed.name,
        "RTSP stream converted to embed"
    );

    Ok(Json(ConvertRtspResponse {
        success: true,
        rtsp_url: rtsp_url.to_string(),
        stream_id: embed.stream_id,
        name: embed.name,
        embed_url: embed.embed_url,
        access_url: embed.access_url,
        stream_url: embed.stream_url,
        poster_url: embed.poster_url,
        monthly_counter: embed.monthly_counter,
        iframe_code: embed.iframe_code,
        note: EMBED_NOTE,
    }))
}
