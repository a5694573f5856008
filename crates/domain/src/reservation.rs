//! Reservation shapes: backend records and the client-facing composites.

use chrono::NaiveDate;
use common::{HotelUid, ReservationUid};
use serde::{Deserialize, Serialize};

use crate::hotel::{HotelInfo, HotelRecord};
use crate::payment::PaymentSlot;
use crate::status::ReservationStatus;

/// Reservation as returned by the reservation service's read endpoints.
///
/// Carries no status and no payment; those come from the merge with the
/// payment service ([`crate::merge::merge_reservation`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    pub reservation_uid: ReservationUid,
    pub hotel: HotelRecord,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Client request body for creating a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub hotel_uid: HotelUid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Reservation service's response to a creation request.
///
/// The nightly `price` is internal pricing input; it never reaches the
/// client response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReservation {
    pub reservation_uid: ReservationUid,
    pub hotel_uid: HotelUid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Nightly price of the booked hotel.
    pub price: f64,
}

/// Client-facing reservation composite produced by the merge policy.
///
/// Invariant: `status` is always one of RESERVED/PAID/CANCELED and
/// `payment` is either `{}` or a complete payment view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_uid: ReservationUid,
    pub hotel: HotelInfo,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub payment: PaymentSlot,
}

/// Client-facing response of the booking workflow.
///
/// Mirrors [`CreatedReservation`] with the nightly price stripped and
/// the applied discount, final status, and payment attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub reservation_uid: ReservationUid,
    pub hotel_uid: HotelUid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Loyalty discount percentage applied to the total.
    pub discount: f64,
    pub status: ReservationStatus,
    pub payment: PaymentSlot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_backend_shape() {
        let json = serde_json::json!({
            "reservationUid": ReservationUid::new(),
            "hotel": {
                "hotelUid": HotelUid::new(),
                "name": "Test",
                "country": "IT",
                "city": "Rome",
                "address": "Via 1",
                "stars": 3,
            },
            "startDate": "2024-01-01",
            "endDate": "2024-01-04",
        });
        let record: ReservationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(
            record.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn record_with_missing_hotel_is_rejected() {
        let json = serde_json::json!({
            "reservationUid": ReservationUid::new(),
            "startDate": "2024-01-01",
            "endDate": "2024-01-04",
        });
        let result: Result<ReservationRecord, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn booking_confirmation_has_no_nightly_price_field() {
        let confirmation = BookingConfirmation {
            reservation_uid: ReservationUid::new(),
            hotel_uid: HotelUid::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            discount: 10.0,
            status: ReservationStatus::Reserved,
            payment: PaymentSlot::empty(),
        };
        let json = serde_json::to_value(&confirmation).unwrap();
        assert!(json.get("price").is_none());
        assert_eq!(json["payment"], serde_json::json!({}));
        assert_eq!(json["startDate"], "2024-01-01");
    }
}
