//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request logging, error reporting, panic catch)
//! - Bind the server to a listener and serve until shutdown
//!
//! # Layer ordering
//! The request logger is outermost so it observes every outcome,
//! including responses synthesized by the error reporter and the panic
//! handler.

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

use crate::db::DatabaseHandle;
use crate::http::error;
use crate::http::middleware::log_requests;
use crate::items;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseHandle,
}

/// HTTP server for the items API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Serve with graceful shutdown
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/items", items::router())
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(middleware::from_fn(error::report_errors))
        .layer(middleware::from_fn(log_requests))
}

/// Liveness probe. Deliberately ignores connection state: the process
/// being up is the only thing this reports.
async fn health() -> Json<Value> {
    tracing::info!("💚 Health check requested");
    Json(json!({ "status": "healthy" }))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
