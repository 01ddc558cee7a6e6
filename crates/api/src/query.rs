//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?stream_id=` filter. `streamId` is accepted as an alias.
#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    #[serde(alias = "streamId")]
    pub stream_id: Option<String>,
}
