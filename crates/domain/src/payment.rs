//! Payment shapes: the payment service's full record, the embedded view,
//! and the slot type that keeps embedded payments all-or-nothing.

use common::{PaymentUid, ReservationUid};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::status::PaymentStatus;

/// Full payment record as returned by the payment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_uid: PaymentUid,
    pub status: PaymentStatus,
    pub price: f64,
}

/// Request body for creating a payment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub reservation_uid: ReservationUid,
    pub status: PaymentStatus,
    pub price: f64,
}

/// Payment view embedded in a client-facing reservation.
///
/// The `paymentUid` is deliberately absent: callers must not depend on
/// the payment identifier through the reservation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub status: PaymentStatus,
    pub price: f64,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        Self {
            status: payment.status,
            price: payment.price,
        }
    }
}

/// The payment field of a client-facing reservation: either an empty
/// JSON object (no payment yet) or a full [`PaymentView`].
///
/// A partial payment object is unrepresentable by construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentSlot(Option<PaymentView>);

impl PaymentSlot {
    /// An empty slot, serialized as `{}`.
    pub fn empty() -> Self {
        Self(None)
    }

    /// A filled slot carrying a full payment view.
    pub fn filled(view: PaymentView) -> Self {
        Self(Some(view))
    }

    /// Returns the embedded view, if any.
    pub fn view(&self) -> Option<&PaymentView> {
        self.0.as_ref()
    }

    /// Returns true if no payment is attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<PaymentView>> for PaymentSlot {
    fn from(view: Option<PaymentView>) -> Self {
        Self(view)
    }
}

impl Serialize for PaymentSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(view) => view.serialize(serializer),
            None => {
                use serde::ser::SerializeMap;
                serializer.serialize_map(Some(0))?.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PaymentSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_object().is_some_and(|obj| obj.is_empty()) {
            return Ok(Self(None));
        }
        let view: PaymentView = serde_json::from_value(value).map_err(D::Error::custom)?;
        Ok(Self(Some(view)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_serializes_as_empty_object() {
        let json = serde_json::to_value(PaymentSlot::empty()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn filled_slot_serializes_the_view() {
        let slot = PaymentSlot::filled(PaymentView {
            status: PaymentStatus::Paid,
            price: 270.0,
        });
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json, serde_json::json!({"status": "PAID", "price": 270.0}));
    }

    #[test]
    fn view_drops_the_payment_uid() {
        let payment = Payment {
            payment_uid: PaymentUid::new(),
            status: PaymentStatus::Paid,
            price: 100.0,
        };
        let json = serde_json::to_value(PaymentView::from(payment)).unwrap();
        assert!(json.get("paymentUid").is_none());
        assert_eq!(json["status"], "PAID");
    }

    #[test]
    fn slot_deserializes_empty_and_filled() {
        let empty: PaymentSlot = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.is_empty());

        let filled: PaymentSlot =
            serde_json::from_value(serde_json::json!({"status": "REVERSED", "price": 10.0}))
                .unwrap();
        assert_eq!(filled.view().unwrap().status, PaymentStatus::Reversed);
    }

    #[test]
    fn slot_rejects_partial_payment_objects() {
        let result: Result<PaymentSlot, _> =
            serde_json::from_value(serde_json::json!({"status": "PAID"}));
        assert!(result.is_err());
    }
}
