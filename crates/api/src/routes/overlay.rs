//! Route definitions for overlay CRUD.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::overlay;
use crate::state::AppState;

/// Overlay routes, merged into `/api`.
///
/// The collection path answers with and without its trailing slash.
///
/// ```text
/// GET    /overlays/                     list_overlays (?stream_id)
/// POST   /overlays/                     create_overlay
/// GET    /overlays/{id}                 get_overlay
/// PUT    /overlays/{id}                 update_overlay
/// DELETE /overlays/{id}                 delete_overlay
/// DELETE /overlays/stream/{stream_id}   delete_stream_overlays
/// ```
pub fn router() -> Router<AppState> {
    let collection = get(overlay::list_overlays).post(overlay::create_overlay);

    Router::new()
        .route("/overlays", collection.clone())
        .route("/overlays/", collection)
        .route(
            "/overlays/{id}",
            get(overlay::get_overlay)
                .put(overlay::update_overlay)
                .delete(overlay::delete_overlay),
        )
        .route(
            "/overlays/stream/{stream_id}",
            delete(overlay::delete_stream_overlays),
        )
}
