//! JSON error responses for the HTTP API.
//!
//! The single error-to-response mapping layer: every failure kind lands
//! here and leaves as `{"error": "..."}` with a category-driven status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skiff_extract::ExtractError;
use skiff_upstream::UpstreamError;

/// API error with status code and user-facing message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: msg.into() }
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: msg.into() }
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match &err {
            UpstreamError::MissingApiKey(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
            UpstreamError::Timeout => Self {
                status: StatusCode::GATEWAY_TIMEOUT,
                message: "Request timed out. Please try again.".into(),
            },
            UpstreamError::Quota => Self {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: "API quota exceeded. Please try again later.".into(),
            },
            UpstreamError::Auth => Self {
                status: StatusCode::UNAUTHORIZED,
                message: "Upstream rejected the configured API key.".into(),
            },
            UpstreamError::Empty => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "No response from AI model".into(),
            },
            UpstreamError::Transport(detail) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("API Error: {detail}"),
            },
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match &err {
            ExtractError::NotFound(_) => ApiError::not_found(err.to_string()),
            ExtractError::DisallowedExtension(_)
            | ExtractError::InvalidUtf8(_)
            | ExtractError::BadFilename(_) => ApiError::bad_request(err.to_string()),
            ExtractError::Io(_) => ApiError::internal(format!("Server Error: {err}")),
        }
    }
}
