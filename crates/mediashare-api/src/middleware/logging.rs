//! Per-request access log.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header::LOCATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Logs method, path, status, duration and, for redirects, the target.
///
/// Health checks log at debug level. Server errors log at warn level.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();
    let redirect_to = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), duration_ms, "Request failed");
    } else if path == "/health" {
        debug!(status = status.as_u16(), duration_ms, "Health check");
    } else if status.is_redirection() {
        info!(%method, %path, status = status.as_u16(), duration_ms, redirect_to, "HTTP request");
    } else {
        info!(%method, %path, status = status.as_u16(), duration_ms, "HTTP request");
    }

    response
}
