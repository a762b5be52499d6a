//! Function-invocation adapter.
//!
//! Exposes the same request pipeline as the standalone server through a
//! single-call interface, for deployments where something other than a
//! long-lived listening socket feeds requests in (FaaS runtimes, test
//! harnesses). The router, middleware, and error reporting are shared
//! with [`crate::http::server`]; only the transport differs.

use axum::{body::Body, extract::Request, response::Response, Router};
use tower::ServiceExt;

use crate::http::server::{build_router, AppState};

/// Request handler driving the full pipeline one invocation at a time.
#[derive(Clone)]
pub struct ServerlessHandler {
    router: Router,
}

impl ServerlessHandler {
    /// Build the handler over the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Process one request through the full middleware pipeline.
    pub async fn invoke(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|infallible| match infallible {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn invoke_drives_the_same_pipeline_as_the_server() {
        let handle = db::open("mongodb://127.0.0.1:9/test").await.unwrap();
        let handler = ServerlessHandler::new(AppState { db: handle });

        let response = handler
            .invoke(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn invocations_are_independent() {
        let handle = db::open("mongodb://127.0.0.1:9/test").await.unwrap();
        let handler = ServerlessHandler::new(AppState { db: handle });

        for _ in 0..3 {
            let response = handler
                .invoke(
                    Request::builder()
                        .uri("/health")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
