use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use rtspio_core::error::CoreError;
use rtspio_db::StoreError;
use rtspio_rtspme::RtspMeError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the per-layer error types and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{ "success": false, "error", "message", "code" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `rtspio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An overlay store failure from `rtspio_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An RTSP.me call failure.
    #[error(transparent)]
    RtspMe(#[from] RtspMeError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An integration the operator has not configured.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine-readable code, summary and detail for one error.
struct ErrorParts {
    status: StatusCode,
    code: &'static str,
    error: String,
    message: String,
}

impl ErrorParts {
    fn new(
        status: StatusCode,
        code: &'static str,
        error: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code,
            error: error.into(),
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let parts = match &self {
            // --- Domain validation ---
            AppError::Core(CoreError::Validation(msg)) => ErrorParts::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation error",
                msg.clone(),
            ),

            // --- Store errors ---
            AppError::Store(store) => classify_store_error(store),

            // --- RTSP.me errors ---
            AppError::RtspMe(err) => classify_rtspme_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => ErrorParts::new(
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "Bad request",
                msg.clone(),
            ),
            AppError::NotConfigured(msg) => {
                tracing::warn!(detail = %msg, "Request hit an unconfigured integration");
                ErrorParts::new(
                    StatusCode::NOT_IMPLEMENTED,
                    "NOT_CONFIGURED",
                    "RTSP.me integration not configured",
                    msg.clone(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorParts::internal()
            }
        };

        let body = json!({
            "success": false,
            "error": parts.error,
            "message": parts.message,
            "code": parts.code,
        });

        (parts.status, axum::Json(body)).into_response()
    }
}

/// Classify a store error.
///
/// - `InvalidId` maps to 400.
/// - `NotFound` maps to 404.
/// - Storage failures map to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> ErrorParts {
    match err {
        StoreError::InvalidId(raw) => ErrorParts::new(
            StatusCode::BAD_REQUEST,
            "INVALID_ID",
            "Invalid overlay ID",
            format!("'{raw}' is not a valid overlay id"),
        ),
        StoreError::NotFound(id) => ErrorParts::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Overlay not found",
            format!("Overlay with id {id} not found"),
        ),
        StoreError::Storage(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            ErrorParts::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                "Database error",
                "A database error occurred",
            )
        }
    }
}

/// Classify an RTSP.me failure.
///
/// An empty camera list means RTSP.me could not convert the URL (404);
/// everything else means the service was unreachable or misbehaved (502).
fn classify_rtspme_error(err: &RtspMeError) -> ErrorParts {
    if err.is_conversion_failure() {
        tracing::warn!(error = %err, "RTSP.me did not convert the stream");
        return ErrorParts::new(
            StatusCode::NOT_FOUND,
            "CONVERSION_FAILED",
            "Failed to convert RTSP URL to embed",
            "Please check your RTSP URL and try again",
        );
    }

    tracing::error!(error = %err, "RTSP.me API error");
    ErrorParts::new(
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_UNAVAILABLE",
        "Failed to connect to RTSP.me",
        "Please check your credentials and RTSP URL",
    )
}

/// Response used by the panic-recovery layer.
///
/// Logs the panic payload and answers with the same sanitized 500 body as
/// [`AppError::InternalError`].
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::InternalError(format!("Handler panicked: {detail}")).into_response()
}
