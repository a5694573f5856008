//! HTTP surface of the hotel booking gateway.
//!
//! Exposes the aggregated booking API over axum, with structured
//! logging (tracing) and Prometheus metrics. All orchestration lives in
//! the `gateway` crate; handlers here extract identity, validate the
//! inbound shape, and map outcomes to HTTP.

pub mod config;
pub mod error;
pub mod identity;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use backends::{
    BackendError, HttpClient, HttpLoyaltyApi, HttpPaymentApi, HttpReservationApi, LoyaltyApi,
    PaymentApi, ReservationApi,
};
use gateway::Gateway;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;

/// Shared application state accessible from all handlers.
pub struct AppState<R, P, L>
where
    R: ReservationApi,
    P: PaymentApi,
    L: LoyaltyApi,
{
    pub gateway: Gateway<R, P, L>,
}

/// Creates the axum application router with all routes and shared state.
pub fn create_app<R, P, L>(
    state: Arc<AppState<R, P, L>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/v1/hotels", get(routes::hotels::list::<R, P, L>))
        .route(
            "/api/v1/reservations",
            get(routes::reservations::list::<R, P, L>),
        )
        .route(
            "/api/v1/reservations",
            post(routes::reservations::create::<R, P, L>),
        )
        .route(
            "/api/v1/reservations/{uid}",
            get(routes::reservations::get::<R, P, L>),
        )
        .route(
            "/api/v1/reservations/{uid}",
            delete(routes::reservations::cancel::<R, P, L>),
        )
        .route("/api/v1/me", get(routes::users::profile::<R, P, L>))
        .route("/api/v1/loyalty", get(routes::users::loyalty::<R, P, L>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state backed by HTTP clients for the three
/// backend services configured in `config`.
pub fn create_http_state(
    config: &Config,
) -> Result<Arc<AppState<HttpReservationApi, HttpPaymentApi, HttpLoyaltyApi>>, BackendError> {
    let http = HttpClient::new(config.backend_timeout)?;

    let reservations = HttpReservationApi::new(http.clone(), &config.reservation_service_url);
    let payments = HttpPaymentApi::new(http.clone(), &config.payment_service_url);
    let loyalty = HttpLoyaltyApi::new(http, &config.loyalty_service_url);

    Ok(Arc::new(AppState {
        gateway: Gateway::new(reservations, payments, loyalty),
    }))
}
