use std::fmt;

use axum::http::HeaderValue;
use rtspio_rtspme::api::{DEFAULT_API_URL, DEFAULT_EMBED_BASE_URL, REQUEST_TIMEOUT};
use rtspio_rtspme::Credentials;

/// Origins allowed when neither `CORS_ORIGINS` nor `CORS_ORIGIN` is set.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Inbound request timeout when `REQUEST_TIMEOUT_SECS` is unset.
///
/// Must stay above the RTSP.me call timeout so a hung upstream is reported
/// as 502 by the handler rather than cut off by the timeout layer.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = REQUEST_TIMEOUT.as_secs() + 15;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// RTSP.me integration settings.
#[derive(Clone)]
pub struct RtspMeConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Conversion endpoint (default: `https://rtsp.me/api/`).
    pub api_url: String,
    /// Player page prefix (default: `https://rtsp.me/embed`).
    pub embed_base_url: String,
}

impl RtspMeConfig {
    /// Operator credentials, or `None` when either half is unset or blank.
    pub fn credentials(&self) -> Option<Credentials> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(Credentials {
                    email: email.to_string(),
                    password: password.to_string(),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Debug for RtspMeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RtspMeConfig")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("embed_base_url", &self.embed_base_url)
            .finish()
    }
}

impl Default for RtspMeConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            api_url: DEFAULT_API_URL.to_string(),
            embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared read-only through `AppState`.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Postgres connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Allowed CORS origins, each a valid header value.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `45`). Always greater than
    /// the RTSP.me call timeout.
    pub request_timeout_secs: u64,
    pub rtspme: RtspMeConfig,
    /// Application secret (`SECRET_KEY`).
    pub secret_key: Option<String>,
    /// Debug mode raises the default log level (`DEBUG`, default: `false`).
    pub debug: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                                 | Default                                          |
    /// |-----------------------------------------|--------------------------------------------------|
    /// | `HOST`                                  | `0.0.0.0`                                        |
    /// | `PORT`                                  | `5000`                                           |
    /// | `DATABASE_URL`                          | required                                         |
    /// | `CORS_ORIGINS` (or `CORS_ORIGIN`)       | `http://localhost:5173,http://127.0.0.1:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`                  | `45`, must exceed the RTSP.me timeout (30 s)     |
    /// | `RTSPME_EMAIL` / `RTSPME_PASSWORD`      | unset                                            |
    /// | `RTSPME_API_URL`                        | `https://rtsp.me/api/`                           |
    /// | `RTSPME_EMBED_BASE_URL`                 | `https://rtsp.me/embed`                          |
    /// | `SECRET_KEY`                            | unset                                            |
    /// | `DEBUG`                                 | `false`                                          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match var("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => 5000,
        };

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let cors_raw = var("CORS_ORIGINS")
            .or_else(|| var("CORS_ORIGIN"))
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into());
        let cors_origins = parse_origins(&cors_raw)?;

        let request_timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = parse_number("REQUEST_TIMEOUT_SECS", &raw)?;
                if secs <= REQUEST_TIMEOUT.as_secs() {
                    return Err(ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value: raw,
                        reason: format!(
                            "must be greater than the RTSP.me timeout of {}s",
                            REQUEST_TIMEOUT.as_secs()
                        ),
                    });
                }
                secs
            }
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let rtspme = RtspMeConfig {
            email: var("RTSPME_EMAIL"),
            password: var("RTSPME_PASSWORD"),
            api_url: var("RTSPME_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            embed_base_url: var("RTSPME_EMBED_BASE_URL")
                .unwrap_or_else(|| DEFAULT_EMBED_BASE_URL.into()),
        };

        let debug = match var("DEBUG") {
            Some(raw) => parse_bool("DEBUG", &raw)?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            rtspme,
            secret_key: var("SECRET_KEY"),
            debug,
        })
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("rtspme", &self.rtspme)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("debug", &self.debug)
            .finish()
    }
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map(|_| origin.to_string())
                .map_err(|e| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}
