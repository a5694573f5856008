//! Hotel listing passthrough.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use backends::{LoyaltyApi, PaymentApi, ReservationApi};
use domain::HotelPage;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// GET /api/v1/hotels — paginated hotel listing, passed through from
/// the reservation service verbatim. No identity required.
#[tracing::instrument(skip(state))]
pub async fn list<R, P, L>(
    State(state): State<Arc<AppState<R, P, L>>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<HotelPage>, ApiError>
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let page = query.page.unwrap_or(1);
    let size = query.size.unwrap_or(10);
    let hotels = state.gateway.list_hotels(page, size).await?;
    Ok(Json(hotels))
}
