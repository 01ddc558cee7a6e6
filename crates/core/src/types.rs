/// Overlay primary keys are UUIDv7, generated by the application on insert.
pub type OverlayId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
