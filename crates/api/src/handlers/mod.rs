//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the store adapter or the RTSP.me client and map errors via
//! [`AppError`].

pub mod overlay;
pub mod rtspme;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{AppError, AppResult};

/// Unwrap a JSON body, turning every extractor rejection into a 400.
pub(crate) fn require_json<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => {
            Err(AppError::BadRequest("Request body is required".to_string()))
        }
        Err(rejection) => Err(AppError::BadRequest(format!(
            "Invalid JSON body: {}",
            rejection.body_text()
        ))),
    }
}
