//! gasTITO - API Server Binary
//!
//! Starts the HTTP API for settlements, spending reports and budgets.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin gastito-api
//!
//! # Run with environment variables
//! GASTITO_HOST=0.0.0.0 GASTITO_PORT=8080 cargo run --bin gastito-api
//! ```
//!
//! # Environment Variables
//!
//! * `GASTITO_HOST` - Server host (default: 0.0.0.0)
//! * `GASTITO_PORT` - Server port (default: 8080)
//! * `GASTITO_JWT_SECRET` - JWT signing secret (required in production)
//! * `GASTITO_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `GASTITO_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `GASTITO_SETTLEMENT_EPSILON` - Settlement tolerance (default: 0.01)
//! * `GASTITO_DEFAULT_CURRENCY` - Currency for requests that omit one (default: PHP)

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid GASTITO_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        currency = %config.default_currency,
        "Starting gasTITO API server"
    );

    let app = create_router(config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
