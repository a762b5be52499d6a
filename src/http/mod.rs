//! HTTP surface: router assembly, middleware pipeline, error reporting.

pub mod error;
pub mod middleware;
pub mod server;
pub mod serverless;

pub use error::AppError;
pub use server::{AppState, HttpServer};
pub use serverless::ServerlessHandler;
