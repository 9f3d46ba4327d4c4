use std::any::Any;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::handlers::ErrorResponse;

/// Turn a handler panic into the JSON 500 envelope
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = detail, "Recovered from panic while handling request");

    ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "recovering from error").into_response()
}

/// Give requests cut off by the timeout layer the JSON error envelope
pub async fn timeout_response(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("Request timed out");
    ErrorResponse::new(StatusCode::REQUEST_TIMEOUT, "request timed out").into_response()
}
