// Shared HTTP response types for consistent API error payloads.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub message: String,
}

// Error taxonomy shared by all handlers.
#[derive(Debug)]
pub enum ApiError {
    // Secret mismatch or missing, or a failed replay check. 403 with no
    // body and no detail about why it failed.
    Forbidden,
    // Missing or malformed required field. No mutation happened.
    BadRequest(&'static str),
    // A dependent collaborator (the recap publisher) is not configured.
    // Rejected before any mutation.
    NotReady(&'static str),
    // A best-effort durable write failed after the in-memory mutation was
    // committed; the mutation is kept.
    Storage,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: message.to_string(),
                }),
            )
                .into_response(),
            ApiError::NotReady(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    message: message.to_string(),
                }),
            )
                .into_response(),
            ApiError::Storage => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "durable write failed".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
