//! User profile and loyalty passthrough endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use backends::{LoyaltyApi, PaymentApi, ReservationApi};
use gateway::UserProfile;

use crate::AppState;
use crate::error::ApiError;
use crate::identity::{Identity, OptionalIdentity};

/// GET /api/v1/me — the user's reservations merged with payments, plus
/// their loyalty record, under one envelope.
#[tracing::instrument(skip(state), fields(user = %user))]
pub async fn profile<R, P, L>(
    State(state): State<Arc<AppState<R, P, L>>>,
    Identity(user): Identity,
) -> Result<Json<UserProfile>, ApiError>
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let profile = state.gateway.get_profile(&user).await?;
    Ok(Json(profile))
}

/// GET /api/v1/loyalty — raw passthrough to the loyalty service.
///
/// The upstream status code is forwarded unchanged; this is the one
/// endpoint that does not normalize to the gateway error envelope. A
/// missing identity header is forwarded too, leaving the upstream to
/// answer it. Transport unreachability still maps to 503, since there
/// is no upstream status to forward.
#[tracing::instrument(skip(state))]
pub async fn loyalty<R, P, L>(
    State(state): State<Arc<AppState<R, P, L>>>,
    OptionalIdentity(user): OptionalIdentity,
) -> Result<Response, ApiError>
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let raw = state.gateway.loyalty_passthrough(user.as_ref()).await?;
    let status =
        StatusCode::from_u16(raw.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok((status, Json(raw.body)).into_response())
}
