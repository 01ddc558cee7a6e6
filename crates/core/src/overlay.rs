//! Overlay field rules.
//!
//! Overlay request bodies are loosely typed: every field except `stream_id`
//! is opaque JSON that the backend stores without interpreting. The only
//! structural checks are required-field presence at creation, `stream_id`
//! being a string, and the absence of NUL characters, which the store cannot
//! hold.

use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Stream an overlay belongs to when the caller does not name one.
pub const DEFAULT_STREAM_ID: &str = "default";

/// Stacking order applied when `zIndex` is omitted.
pub const DEFAULT_Z_INDEX: i64 = 1;

/// Visibility applied when `visible` is omitted.
pub const DEFAULT_VISIBLE: bool = true;

/// Fields that must be present in a create body, checked in this order.
pub const REQUIRED_FIELDS: &[&str] = &["type", "content", "position", "size"];

/// Fields a partial update may change. `stream_id` is fixed at creation.
pub const UPDATABLE_FIELDS: &[&str] = &[
    "type", "content", "position", "size", "zIndex", "visible", "style",
];

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Validated input for creating an overlay, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOverlay {
    pub stream_id: String,
    pub overlay_type: Value,
    pub content: Value,
    pub position: Value,
    pub size: Value,
    pub z_index: Value,
    pub visible: Value,
    pub style: Value,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOverlay {
    pub overlay_type: Option<Value>,
    pub content: Option<Value>,
    pub position: Option<Value>,
    pub size: Option<Value>,
    pub z_index: Option<Value>,
    pub visible: Option<Value>,
    pub style: Option<Value>,
}

impl CreateOverlay {
    /// Parse a create request body.
    ///
    /// Fails when the body is not a non-empty JSON object, when any of
    /// [`REQUIRED_FIELDS`] is missing, when `stream_id` is not a string, or
    /// when a value contains a NUL character. Unknown keys are ignored.
    pub fn from_json(body: &Value) -> Result<Self, CoreError> {
        let fields = require_body(body)?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
            return Err(CoreError::Validation(format!(
                "Missing required field: {missing}"
            )));
        }

        let stream_id = match fields.get("stream_id") {
            None | Some(Value::Null) => DEFAULT_STREAM_ID.to_string(),
            Some(Value::String(s)) => {
                check_stream_id(s)?;
                s.clone()
            }
            Some(_) => {
                return Err(CoreError::Validation(
                    "Field 'stream_id' must be a string".to_string(),
                ))
            }
        };

        let field = |name: &str, default: Option<Value>| -> Result<Value, CoreError> {
            match fields.get(name) {
                Some(value) => storable(name, value).map(|_| value.clone()),
                None => Ok(default.unwrap_or(Value::Null)),
            }
        };

        Ok(Self {
            stream_id,
            overlay_type: field("type", None)?,
            content: field("content", None)?,
            position: field("position", None)?,
            size: field("size", None)?,
            z_index: field("zIndex", Some(Value::from(DEFAULT_Z_INDEX)))?,
            visible: field("visible", Some(Value::Bool(DEFAULT_VISIBLE)))?,
            style: field("style", Some(Value::Object(Map::new())))?,
        })
    }
}

impl UpdateOverlay {
    /// Parse a partial update body. Only keys in [`UPDATABLE_FIELDS`] are
    /// picked up; everything else is ignored.
    pub fn from_json(body: &Value) -> Result<Self, CoreError> {
        let fields = require_body(body)?;
        let mut patch = Self::default();

        for &name in UPDATABLE_FIELDS {
            let Some(value) = fields.get(name) else {
                continue;
            };
            storable(name, value)?;

            let slot = match name {
                "type" => &mut patch.overlay_type,
                "content" => &mut patch.content,
                "position" => &mut patch.position,
                "size" => &mut patch.size,
                "zIndex" => &mut patch.z_index,
                "visible" => &mut patch.visible,
                _ => &mut patch.style,
            };
            *slot = Some(value.clone());
        }

        Ok(patch)
    }
}

/// Reject stream ids the store cannot hold.
pub fn check_stream_id(stream_id: &str) -> Result<(), CoreError> {
    if stream_id.contains('\0') {
        return Err(nul_error("stream_id"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_body(body: &Value) -> Result<&Map<String, Value>, CoreError> {
    match body {
        Value::Object(map) if !map.is_empty() => Ok(map),
        _ => Err(CoreError::Validation("Request body is required".to_string())),
    }
}

/// Postgres text and JSONB values cannot contain `\u0000`, in strings or keys.
fn storable(name: &str, value: &Value) -> Result<(), CoreError> {
    if contains_nul(value) {
        return Err(nul_error(name));
    }
    Ok(())
}

fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(map) => map
            .iter()
            .any(|(key, item)| key.contains('\0') || contains_nul(item)),
        _ => false,
    }
}

fn nul_error(name: &str) -> CoreError {
    CoreError::Validation(format!("Field '{name}' must not contain NUL characters"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
