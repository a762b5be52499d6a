//! Standalone server entry point.
//!
//! Startup order matters: configuration is loaded and the database
//! connection is established before the listener binds, so the process
//! never accepts traffic it cannot serve. Any startup failure is fatal.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use items_api::config::AppConfig;
use items_api::db;
use items_api::http::server::{AppState, HttpServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "items_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("items-api v{} starting", env!("CARGO_PKG_VERSION"));

    // Fail fast on misconfiguration, before any connection attempt
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        bind_address = %config.bind_address,
        "Configuration loaded"
    );

    // Initial connection failure is intentionally fatal; no retry policy
    let handle = match db::connect(&config.mongodb_uri).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, trace = ?e, "❌ MongoDB connection error");
            std::process::exit(1);
        }
    };

    // Bind TCP listener
    let listener = TcpListener::bind(&config.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(AppState { db: handle });
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
