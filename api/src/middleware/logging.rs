use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Paths polled by infrastructure; logged at debug to keep access logs quiet
const QUIET_PATHS: [&str; 2] = ["/health", "/metrics"];

/// Log method, URI, status and latency of every request
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    let elapsed = started.elapsed();
    let status = response.status().as_u16();
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

    if QUIET_PATHS.contains(&uri.path()) {
        tracing::debug!(%method, %uri, status, elapsed_ms, "{} {} took {:?}", method, uri, elapsed);
    } else {
        tracing::info!(%method, %uri, status, elapsed_ms, "{} {} took {:?}", method, uri, elapsed);
    }

    response
}
