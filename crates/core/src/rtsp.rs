//! RTSP URL validation and embed markup helpers.

use crate::error::CoreError;

/// URI schemes accepted for camera URLs.
pub const ACCEPTED_SCHEMES: &[&str] = &["rtsp://", "rtsps://"];

/// Stream name sent upstream when the caller does not provide one.
pub const DEFAULT_STREAM_NAME: &str = "RTSP Stream";

/// Player frame dimensions used in generated iframe markup.
pub const EMBED_WIDTH: u32 = 640;
pub const EMBED_HEIGHT: u32 = 480;

/// Check that `url` is present, non-blank and uses an accepted scheme.
///
/// Returns the URL unchanged on success.
pub fn validate_rtsp_url(url: Option<&str>) -> Result<&str, CoreError> {
    let url = match url {
        Some(u) if !u.trim().is_empty() => u,
        _ => return Err(CoreError::Validation("RTSP URL is required".to_string())),
    };

    if !ACCEPTED_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        return Err(CoreError::Validation(
            "Invalid RTSP URL format. Must start with rtsp:// or rtsps://".to_string(),
        ));
    }

    Ok(url)
}

/// Build the player URL for an upstream stream id: `{base}/{stream_id}/`.
pub fn embed_url(base: &str, stream_id: &str) -> String {
    format!("{}/{stream_id}/", base.trim_end_matches('/'))
}

/// Ready-to-paste iframe markup for an embed URL.
pub fn iframe_code(embed_url: &str) -> String {
    format!(
        r#"<iframe width="{EMBED_WIDTH}" height="{EMBED_HEIGHT}" src="{}" frameborder="0" title="RTSP Stream Player" allowfullscreen></iframe>"#,
        escape_attribute(embed_url)
    )
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
