//! Identity extraction from the `X-User-Name` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::{USER_HEADER, Username};

use crate::error::{ApiError, FieldError};

/// The caller's identity, required on every identity-scoped route.
///
/// Rejects the request with a 400 validation error before any backend
/// call when the header is missing or empty.
#[derive(Debug, Clone)]
pub struct Identity(pub Username);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if value.is_empty() {
            return Err(ApiError::validation(
                format!("{USER_HEADER} header is required"),
                vec![FieldError::new(USER_HEADER, "required header is missing")],
            ));
        }
        Ok(Self(Username::new(value)))
    }
}

/// The caller's identity when the header is present.
///
/// Used by passthrough routes that forward whatever identity they were
/// given instead of rejecting locally; extraction never fails.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Username>);

impl<S: Send + Sync> FromRequestParts<S> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        Ok(Self((!value.is_empty()).then(|| Username::new(value))))
    }
}
