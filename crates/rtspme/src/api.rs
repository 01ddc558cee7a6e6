//! HTTP client for the RTSP.me conversion endpoint.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use rtspio_core::rtsp::{embed_url, iframe_code};

/// Conversion endpoint used when none is configured.
pub const DEFAULT_API_URL: &str = "https://rtsp.me/api/";

/// Prefix of the hosted player page, completed with `/{stream_id}/`.
pub const DEFAULT_EMBED_BASE_URL: &str = "https://rtsp.me/embed";

/// Upper bound on a single conversion call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Operator account used to authenticate against RTSP.me.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One conversion request.
#[derive(Debug, Clone, Copy)]
pub struct ConvertRequest<'a> {
    pub rtsp_url: &'a str,
    pub name: &'a str,
    /// Client IP RTSP.me restricts playback to, if any.
    pub ip: Option<&'a str>,
}

/// A camera record as returned by RTSP.me.
///
/// Only `id` is interpreted; the other fields pass through whatever JSON
/// type RTSP.me sends.
#[derive(Debug, Clone, Deserialize)]
pub struct Camera {
    /// Upstream stream id; RTSP.me has returned both strings and numbers.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub url: Option<Value>,
    #[serde(default)]
    pub poster: Option<Value>,
    #[serde(default)]
    pub monthly_counter: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    cameras: Option<Vec<Camera>>,
}

/// Embed metadata derived from the first camera of a conversion response.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub stream_id: String,
    pub name: Value,
    pub embed_url: String,
    pub access_url: Value,
    pub stream_url: Value,
    pub poster_url: Value,
    pub monthly_counter: Value,
    pub iframe_code: String,
}

/// Errors from the RTSP.me client.
#[derive(Debug, thiserror::Error)]
pub enum RtspMeError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, or an
    /// undecodable body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// RTSP.me returned a non-2xx status code.
    #[error("RTSP.me API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response carried no camera records.
    #[error("RTSP.me returned no cameras")]
    NoCameras,

    /// The first camera record had no usable id.
    #[error("RTSP.me camera record has no stream id")]
    MissingStreamId,
}

impl RtspMeError {
    /// True when RTSP.me answered but could not convert the URL, as opposed
    /// to the service being unreachable or misbehaving.
    pub fn is_conversion_failure(&self) -> bool {
        matches!(self, Self::NoCameras)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the RTSP.me conversion API.
pub struct RtspMeClient {
    client: reqwest::Client,
    api_url: String,
    embed_base_url: String,
}

impl RtspMeClient {
    /// Create a client with [`REQUEST_TIMEOUT`] applied to every call.
    pub fn new(api_url: String, embed_base_url: String) -> Result<Self, RtspMeError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, api_url, embed_base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, embed_base_url: String) -> Self {
        Self {
            client,
            api_url,
            embed_base_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Register an RTSP URL with RTSP.me and derive its embed metadata.
    ///
    /// Sends one form-encoded `POST` to the API URL. The embed URL is built
    /// from the returned stream id; the camera's own URLs pass through as-is.
    pub async fn convert(
        &self,
        credentials: &Credentials,
        request: &ConvertRequest<'_>,
    ) -> Result<Embed, RtspMeError> {
        let mut form = vec![
            ("email", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
            ("url", request.rtsp_url),
            ("name", request.name),
        ];
        if let Some(ip) = request.ip {
            form.push(("ip", ip));
        }

        tracing::debug!(name = request.name, has_ip = request.ip.is_some(), "Submitting RTSP.me conversion");

        let response = self.client.post(&self.api_url).form(&form).send().await?;
        let response = Self::ensure_success(response).await?;
        let body: ConvertResponse = response.json().await?;

        let camera = body
            .cameras
            .and_then(|cameras| cameras.into_iter().next())
            .ok_or(RtspMeError::NoCameras)?;

        self.embed_from_camera(camera, request.name)
    }

    fn embed_from_camera(&self, camera: Camera, fallback_name: &str) -> Result<Embed, RtspMeError> {
        let stream_id = camera
            .id
            .as_ref()
            .and_then(stream_id_string)
            .ok_or(RtspMeError::MissingStreamId)?;

        let embed_url = embed_url(&self.embed_base_url, &stream_id);
        let empty = || Value::String(String::new());
        let stream_url = camera.url.unwrap_or_else(empty);

        Ok(Embed {
            iframe_code: iframe_code(&embed_url),
            name: camera
                .name
                .unwrap_or_else(|| Value::String(fallback_name.to_string())),
            access_url: stream_url.clone(),
            stream_url,
            poster_url: camera.poster.unwrap_or_else(empty),
            monthly_counter: camera.monthly_counter.unwrap_or_else(empty),
            embed_url,
            stream_id,
        })
    }

    /// Return the response unchanged on a 2xx status, or an
    /// [`RtspMeError::ApiError`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RtspMeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RtspMeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Normalize an upstream id to a non-empty string.
fn stream_id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
