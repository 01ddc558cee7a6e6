#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use rtspio_api::config::{RtspMeConfig, ServerConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
use rtspio_api::router::build_app_router;
use rtspio_api::state::AppState;
use rtspio_rtspme::api::DEFAULT_EMBED_BASE_URL;
use rtspio_rtspme::RtspMeClient;

pub const TEST_EMAIL: &str = "ops@example.com";
pub const TEST_PASSWORD: &str = "rtspme-test-password";

/// Build a test `ServerConfig` with safe defaults and no RTSP.me credentials.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://localhost/unused".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        rtspme: RtspMeConfig::default(),
        secret_key: None,
        debug: true,
    }
}

/// Test config with RTSP.me credentials pointing at `api_url`.
pub fn configured_rtspme(api_url: &str) -> ServerConfig {
    let mut config = test_config();
    config.rtspme = RtspMeConfig {
        email: Some(TEST_EMAIL.to_string()),
        password: Some(TEST_PASSWORD.to_string()),
        api_url: api_url.to_string(),
        embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
    };
    config
}

/// A pool that never connects until used. For tests that do not touch the
/// database; a short acquire timeout keeps accidental use from hanging.
pub fn lazy_pool(url: &str) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy(url)
        .unwrap()
}

/// Build the full application router for `config`, optionally with a custom
/// HTTP client for RTSP.me calls.
pub fn build_app_with(pool: PgPool, config: ServerConfig, http: Option<reqwest::Client>) -> Router {
    let rtspme = match http {
        Some(client) => RtspMeClient::with_client(
            client,
            config.rtspme.api_url.clone(),
            config.rtspme.embed_base_url.clone(),
        ),
        None => RtspMeClient::new(
            config.rtspme.api_url.clone(),
            config.rtspme.embed_base_url.clone(),
        )
        .unwrap(),
    };

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rtspme: Arc::new(rtspme),
    };

    build_app_router(state, &config)
}

/// Build the application router with the default test config.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with(pool, test_config(), None)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
