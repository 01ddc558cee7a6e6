/// Failures surfaced by the overlay store adapter.
///
/// A malformed identifier is reported separately from a well-formed one that
/// matches no row, so the HTTP layer can answer 400 and 404 respectively.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid overlay id: {0}")]
    InvalidId(String),

    #[error("Overlay not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
