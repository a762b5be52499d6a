//! Request/response logging middleware.
//!
//! Every request gets an arrival entry (method, URL, headers, body) and
//! exactly one completion entry (elapsed time, status, URL). The
//! completion entry is emitted from a scope guard so it fires even when
//! the response future is dropped mid-flight, in which case a distinct
//! error entry precedes it. The middleware never alters what downstream
//! handlers see.

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Bodies above this size are logged as `<omitted>`.
const BODY_LOG_LIMIT: u64 = 64 * 1024;

/// Log the full request/response cycle around the rest of the pipeline.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let headers = render_headers(request.headers());

    let (request, body) = capture_body(request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        url = %uri,
        headers = %headers,
        body = %body,
        "🔵 New request"
    );

    // The guard logs completion on drop, whether or not `next` finishes.
    let mut completion = CompletionGuard {
        request_id,
        method,
        uri,
        started,
        status: None,
    };

    let response = next.run(request).await;
    completion.status = Some(response.status().as_u16());
    response
}

struct CompletionGuard {
    request_id: Uuid,
    method: Method,
    uri: Uri,
    started: Instant,
    status: Option<u16>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        match self.status {
            Some(status) => {
                tracing::info!(
                    request_id = %self.request_id,
                    duration_ms,
                    status,
                    url = %self.uri,
                    "🟢 Request completed"
                );
            }
            None => {
                // Response future dropped before a status existed; the
                // client most likely went away mid-transmission.
                tracing::error!(
                    request_id = %self.request_id,
                    url = %self.uri,
                    error = "response dropped before completion",
                    "🔴 Error"
                );
                tracing::info!(
                    request_id = %self.request_id,
                    duration_ms,
                    status = "aborted",
                    method = %self.method,
                    url = %self.uri,
                    "🟢 Request completed"
                );
            }
        }
    }
}

/// Buffer the request body for logging when its declared length is
/// small, handing back an equivalent request either way.
async fn capture_body(request: Request) -> (Request, String) {
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    match declared {
        None | Some(0) => (request, "<none>".to_string()),
        Some(len) if len > BODY_LOG_LIMIT => (request, "<omitted>".to_string()),
        Some(_) => {
            let (parts, body) = request.into_parts();
            match axum::body::to_bytes(body, BODY_LOG_LIMIT as usize).await {
                Ok(bytes) => {
                    let rendered = String::from_utf8_lossy(&bytes).into_owned();
                    (Request::from_parts(parts, Body::from(bytes)), rendered)
                }
                // Body read failed; the request will fail downstream too.
                Err(_) => (
                    Request::from_parts(parts, Body::empty()),
                    "<unreadable>".to_string(),
                ),
            }
        }
    }
}

/// Render headers as a JSON object, folding repeated names into arrays.
fn render_headers(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for name in headers.keys() {
        let mut values: Vec<Value> = headers
            .get_all(name)
            .iter()
            .map(|value| Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()))
            .collect();
        let rendered = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::Array(values)
        };
        map.insert(name.as_str().to_string(), rendered);
    }
    Value::Object(map)
}
