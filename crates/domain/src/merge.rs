//! Merge policy: combining a reservation record with its (possibly
//! absent) payment record into one client-facing composite.
//!
//! Kept separate from deserialization so the defaulting rules are
//! testable without touching any backend.

use crate::payment::{Payment, PaymentSlot, PaymentView};
use crate::reservation::{Reservation, ReservationRecord};
use crate::status::ReservationStatus;

/// Merges one reservation record with its payment lookup result.
///
/// No payment: the status defaults to RESERVED and the payment field is
/// an empty object. Payment present: its status becomes the reservation
/// status and the full payment, minus its own identifier, is embedded.
pub fn merge_reservation(record: ReservationRecord, payment: Option<Payment>) -> Reservation {
    let (status, slot) = match payment {
        None => (ReservationStatus::Reserved, PaymentSlot::empty()),
        Some(payment) => (
            ReservationStatus::from(payment.status),
            PaymentSlot::filled(PaymentView::from(payment)),
        ),
    };

    Reservation {
        reservation_uid: record.reservation_uid,
        hotel: record.hotel.into(),
        start_date: record.start_date,
        end_date: record.end_date,
        status,
        payment: slot,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::{HotelUid, PaymentUid, ReservationUid};

    use super::*;
    use crate::hotel::HotelRecord;
    use crate::status::PaymentStatus;

    fn record() -> ReservationRecord {
        ReservationRecord {
            reservation_uid: ReservationUid::new(),
            hotel: HotelRecord {
                hotel_uid: HotelUid::new(),
                name: "Test".to_string(),
                country: "IT".to_string(),
                city: "Rome".to_string(),
                address: "Via 1".to_string(),
                stars: 3,
            },
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        }
    }

    fn payment(status: PaymentStatus) -> Payment {
        Payment {
            payment_uid: PaymentUid::new(),
            status,
            price: 270.0,
        }
    }

    #[test]
    fn no_payment_defaults_to_reserved_with_empty_payment() {
        let merged = merge_reservation(record(), None);
        assert_eq!(merged.status, ReservationStatus::Reserved);
        assert!(merged.payment.is_empty());
    }

    #[test]
    fn paid_payment_sets_status_and_embeds_view() {
        let merged = merge_reservation(record(), Some(payment(PaymentStatus::Paid)));
        assert_eq!(merged.status, ReservationStatus::Paid);
        let view = merged.payment.view().unwrap();
        assert_eq!(view.status, PaymentStatus::Paid);
        assert_eq!(view.price, 270.0);
    }

    #[test]
    fn reversed_payment_marks_reservation_canceled() {
        let merged = merge_reservation(record(), Some(payment(PaymentStatus::Reversed)));
        assert_eq!(merged.status, ReservationStatus::Canceled);
        assert!(!merged.payment.is_empty());
    }

    #[test]
    fn embedded_payment_never_exposes_payment_uid() {
        let merged = merge_reservation(record(), Some(payment(PaymentStatus::Paid)));
        let json = serde_json::to_value(&merged).unwrap();
        assert!(json["payment"].get("paymentUid").is_none());
        assert_eq!(json["payment"]["status"], "PAID");
    }

    #[test]
    fn hotel_is_condensed_in_the_composite() {
        let merged = merge_reservation(record(), None);
        assert_eq!(merged.hotel.full_address, "IT, Rome, Via 1");
    }
}
