use axum::routing::post;
use axum::Router;

use crate::handlers::rtspme;
use crate::state::AppState;

/// RTSP.me integration routes, merged into `/api`.
///
/// ```text
/// POST /rtspme/convert-rtsp     convert_rtsp
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/rtspme/convert-rtsp", post(rtspme::convert_rtsp))
}
