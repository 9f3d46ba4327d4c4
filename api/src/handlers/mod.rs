pub mod health;
pub mod index;
pub mod metrics;
pub mod ptlist;

// Common response types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::errors::PeriodicTaskError;
use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// JSON envelope returned by every API endpoint: `{status, data|error}`
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Standard API success response
#[derive(Debug)]
pub struct SuccessResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            status: STATUS_SUCCESS.to_string(),
            error: None,
            data: Some(self.data),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Standard API error response
#[derive(Debug)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "something went wrong")
    }
}

impl From<PeriodicTaskError> for ErrorResponse {
    fn from(err: PeriodicTaskError) -> Self {
        if err.is_client_error() {
            ErrorResponse::new(StatusCode::BAD_REQUEST, err.to_string())
        } else {
            // Internal details stay in the logs
            ErrorResponse::internal()
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope {
            status: STATUS_ERROR.to_string(),
            error: Some(self.message),
            data: None,
        };

        (self.status, Json(body)).into_response()
    }
}
