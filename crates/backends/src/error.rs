//! Uniform classification of backend call failures.

use thiserror::Error;

/// Errors from one outbound backend call, classified once at the client
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend could not be reached at the network layer.
    #[error("Service temporarily unavailable")]
    Unavailable,

    /// The backend responded 404 for the requested resource.
    #[error("Resource not found")]
    NotFound,

    /// The backend responded 2xx with a body that does not match the
    /// expected shape. Indicates contract drift between gateway and
    /// backend; always logged where classified.
    #[error("Invalid response format: {detail}")]
    InvalidResponse { detail: String },

    /// Any other failure: unexpected status code, request build error,
    /// or transport error past the connection stage.
    #[error("Internal service error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Shorthand for an invalid-response classification.
    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self::InvalidResponse {
            detail: detail.into(),
        }
    }
}

/// Convenience type alias for backend call results.
pub type Result<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_client_facing_wording() {
        assert_eq!(
            BackendError::Unavailable.to_string(),
            "Service temporarily unavailable"
        );
        assert_eq!(BackendError::NotFound.to_string(), "Resource not found");
        assert!(
            BackendError::invalid_response("missing field `price`")
                .to_string()
                .contains("missing field `price`")
        );
    }
}
