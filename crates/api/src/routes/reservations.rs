//! Reservation endpoints: merged reads, the booking workflow and the
//! cancel workflow.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use backends::{LoyaltyApi, PaymentApi, ReservationApi};
use chrono::NaiveDate;
use common::{HotelUid, ReservationUid};
use domain::{BookingConfirmation, NewReservation, Reservation};
use gateway::CancelOutcome;

use crate::AppState;
use crate::error::{ApiError, FieldError};
use crate::identity::Identity;

/// GET /api/v1/reservations — the user's reservations, each merged with
/// its payment record.
#[tracing::instrument(skip(state), fields(user = %user))]
pub async fn list<R, P, L>(
    State(state): State<Arc<AppState<R, P, L>>>,
    Identity(user): Identity,
) -> Result<Json<Vec<Reservation>>, ApiError>
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let reservations = state.gateway.list_reservations(&user).await?;
    Ok(Json(reservations))
}

/// GET /api/v1/reservations/{uid} — one merged reservation.
#[tracing::instrument(skip(state), fields(user = %user))]
pub async fn get<R, P, L>(
    State(state): State<Arc<AppState<R, P, L>>>,
    Identity(user): Identity,
    Path(uid): Path<ReservationUid>,
) -> Result<Json<Reservation>, ApiError>
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let reservation = state.gateway.get_reservation(&user, uid).await?;
    Ok(Json(reservation))
}

/// POST /api/v1/reservations — runs the booking workflow.
#[tracing::instrument(skip(state, body), fields(user = %user))]
pub async fn create<R, P, L>(
    State(state): State<Arc<AppState<R, P, L>>>,
    Identity(user): Identity,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<BookingConfirmation>, ApiError>
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let Json(body) = body.map_err(|e| {
        ApiError::validation(
            "Validation error",
            vec![FieldError::new("body", e.body_text())],
        )
    })?;
    let request = parse_booking(&body)?;

    let confirmation = state.gateway.book(&user, &request).await?;
    Ok(Json(confirmation))
}

/// DELETE /api/v1/reservations/{uid} — runs the cancel workflow.
///
/// The tagged outcome maps to HTTP here and nowhere else.
#[tracing::instrument(skip(state), fields(user = %user))]
pub async fn cancel<R, P, L>(
    State(state): State<Arc<AppState<R, P, L>>>,
    Identity(user): Identity,
    Path(uid): Path<ReservationUid>,
) -> Result<Response, ApiError>
where
    R: ReservationApi + 'static,
    P: PaymentApi + 'static,
    L: LoyaltyApi + 'static,
{
    let outcome = state.gateway.cancel(&user, uid).await?;
    let response = match outcome {
        CancelOutcome::Completed => StatusCode::NO_CONTENT.into_response(),
        CancelOutcome::NoPaymentToReconcile => (
            StatusCode::NOT_IMPLEMENTED,
            Json(serde_json::json!({ "message": "No payment to reconcile" })),
        )
            .into_response(),
        CancelOutcome::UpstreamInconsistent => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(serde_json::json!({ "message": "Upstream services are inconsistent" })),
        )
            .into_response(),
    };
    Ok(response)
}

/// Validates the booking request body, collecting every field error.
fn parse_booking(body: &serde_json::Value) -> Result<NewReservation, ApiError> {
    let mut errors = Vec::new();

    let hotel_uid = match body.get("hotelUid").and_then(|v| v.as_str()) {
        Some(s) => match s.parse::<HotelUid>() {
            Ok(uid) => Some(uid),
            Err(_) => {
                errors.push(FieldError::new("hotelUid", "not a valid UUID"));
                None
            }
        },
        None => {
            errors.push(FieldError::new("hotelUid", "required field is missing"));
            None
        }
    };
    let start_date = parse_date(body, "startDate", &mut errors);
    let end_date = parse_date(body, "endDate", &mut errors);

    if let (Some(start), Some(end)) = (start_date, end_date)
        && end <= start
    {
        errors.push(FieldError::new("endDate", "must be after startDate"));
    }

    // All three are present exactly when no error was recorded.
    match (hotel_uid, start_date, end_date) {
        (Some(hotel_uid), Some(start_date), Some(end_date)) if errors.is_empty() => {
            Ok(NewReservation {
                hotel_uid,
                start_date,
                end_date,
            })
        }
        _ => Err(ApiError::validation("Validation error", errors)),
    }
}

fn parse_date(
    body: &serde_json::Value,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    match body.get(field).and_then(|v| v.as_str()) {
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(field, "not a valid date (YYYY-MM-DD)"));
                None
            }
        },
        None => {
            errors.push(FieldError::new(field, "required field is missing"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "hotelUid": HotelUid::new(),
            "startDate": "2024-01-01",
            "endDate": "2024-01-04",
        })
    }

    #[test]
    fn valid_body_parses() {
        let request = parse_booking(&valid_body()).unwrap();
        assert_eq!(
            request.end_date,
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()
        );
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let err = parse_booking(&serde_json::json!({})).unwrap_err();
        let ApiError::Validation { errors, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn bad_uuid_is_a_field_error() {
        let mut body = valid_body();
        body["hotelUid"] = "not-a-uuid".into();
        let err = parse_booking(&body).unwrap_err();
        let ApiError::Validation { errors, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "hotelUid");
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut body = valid_body();
        body["endDate"] = "2023-12-31".into();
        let err = parse_booking(&body).unwrap_err();
        let ApiError::Validation { errors, .. } = err else {
            panic!("expected validation error");
        };
        assert!(errors.iter().any(|e| e.field == "endDate"));
    }

    #[test]
    fn same_day_stay_is_rejected() {
        let mut body = valid_body();
        body["endDate"] = "2024-01-01".into();
        assert!(parse_booking(&body).is_err());
    }
}
