//! API error types with HTTP response mapping.
//!
//! Backend failures arrive pre-classified as [`BackendError`]; this is
//! the single place they map to HTTP statuses and the client-facing
//! `{ message, errors[] }` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use backends::BackendError;
use serde::Serialize;

/// One `(field, error)` pair in a validation error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or incomplete inbound request, raised locally before
    /// any backend call.
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
    /// Classified failure from a backend call.
    Backend(BackendError),
}

impl ApiError {
    /// Creates a validation error with a field-error list.
    pub fn validation(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { message, errors } => {
                let body = serde_json::json!({ "message": message, "errors": errors });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            ApiError::Backend(err) => backend_error_to_response(err),
        }
    }
}

fn backend_error_to_response(err: BackendError) -> Response {
    let (status, body) = match &err {
        BackendError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({ "message": "Service temporarily unavailable" }),
        ),
        BackendError::NotFound => (
            StatusCode::NOT_FOUND,
            serde_json::json!({ "message": "Resource not found" }),
        ),
        BackendError::InvalidResponse { detail } => {
            // Contract drift between gateway and backend.
            tracing::error!(detail, "backend response failed validation");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "message": "Invalid response format",
                    "errors": [ FieldError::new("response", detail.clone()) ],
                }),
            )
        }
        BackendError::Internal(msg) => {
            tracing::error!(error = %msg, "internal service error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "message": "Internal service error" }),
            )
        }
    };
    (status, axum::Json(body)).into_response()
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        ApiError::Backend(err)
    }
}
