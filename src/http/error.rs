//! Centralized error reporting.
//!
//! Any unrecovered failure while producing a response becomes a flat
//! `{"error": "<message>"}` body. Server-side failures (500) are tagged
//! with an [`ErrorDetail`] response extension so the [`report_errors`]
//! middleware, which still holds the request URL, can log them before
//! the response leaves the pipeline. This is terminal per request;
//! nothing here retries or recovers the handler's intended response.

use std::any::Any;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error type for request handling.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{0}")]
    Internal(String),

    #[error("Item not found")]
    NotFound,

    #[error("invalid item id {0:?}")]
    InvalidId(String),
}

impl AppError {
    /// An opaque server-side failure with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Detail attached to 500-class responses for the reporting middleware.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    pub trace: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let mut response = (status, Json(json!({ "error": message.clone() }))).into_response();

        if status.is_server_error() {
            response.extensions_mut().insert(ErrorDetail {
                message,
                trace: format!("{self:?}"),
            });
        }
        response
    }
}

/// Log tagged failures with the request URL before the response leaves.
pub async fn report_errors(request: Request, next: Next) -> Response {
    let uri = request.uri().clone();
    let response = next.run(request).await;

    if let Some(detail) = response.extensions().get::<ErrorDetail>() {
        tracing::error!(
            url = %uri,
            error = %detail.message,
            trace = %detail.trace,
            "🔴 Error"
        );
    }
    response
}

/// Convert a panic in a downstream handler into the flat 500 shape.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    };

    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message.clone() })),
    )
        .into_response();
    response.extensions_mut().insert(ErrorDetail {
        trace: format!("panic: {message}"),
        message,
    });
    response
}
