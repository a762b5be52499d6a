//! Items API service library.
//!
//! A small HTTP service exposing CRUD operations on an `items` collection
//! backed by MongoDB. The repo-specific logic is the request lifecycle
//! pipeline: request/response logging middleware, database connection
//! lifecycle, and centralized error reporting. Routing, parsing, and
//! persistence are delegated to Axum and the MongoDB driver.

pub mod config;
pub mod db;
pub mod http;
pub mod items;

pub use config::AppConfig;
pub use db::{ConnectionState, DatabaseHandle};
pub use http::server::{AppState, HttpServer};
pub use http::serverless::ServerlessHandler;
