use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rtspio_api::config::ServerConfig;
use rtspio_api::router::build_app_router;
use rtspio_api::state::AppState;
use rtspio_rtspme::RtspMeClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid configuration");

    // --- Tracing ---
    let default_filter = if config.debug {
        "rtspio_api=debug,rtspio_rtspme=debug,tower_http=debug"
    } else {
        "rtspio_api=info,rtspio_rtspme=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(host = %config.host, port = %config.port, debug = config.debug, "Loaded server configuration");

    if config.secret_key.is_none() && !config.debug {
        tracing::warn!("SECRET_KEY is not set");
    }
    if config.rtspme.credentials().is_none() {
        tracing::warn!("RTSPME_EMAIL / RTSPME_PASSWORD not set; RTSP conversion will answer 501");
    }

    // --- Database ---
    let pool = rtspio_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    rtspio_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    rtspio_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- RTSP.me client ---
    let rtspme = RtspMeClient::new(
        config.rtspme.api_url.clone(),
        config.rtspme.embed_base_url.clone(),
    )
    .expect("Failed to build RTSP.me HTTP client");
    tracing::info!(api_url = %rtspme.api_url(), "RTSP.me client ready");

    // --- App state ---
    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: Arc::clone(&config),
        rtspme: Arc::new(rtspme),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
