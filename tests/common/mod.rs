//! Shared utilities for integration tests.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use items_api::db;
use items_api::http::server::{AppState, HttpServer};

/// URI of a server that never answers; the closed port makes driver
/// operations block on server selection until their timeout.
pub const UNREACHABLE_URI: &str = "mongodb://127.0.0.1:9/test?serverSelectionTimeoutMS=5000";

/// Spawn the service on an ephemeral port over a lazily-opened (never
/// pinged, hence never connected) database handle.
pub async fn spawn_app() -> SocketAddr {
    let handle = db::open(UNREACHABLE_URI)
        .await
        .expect("lazy open must not contact the server");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(AppState { db: handle });

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
