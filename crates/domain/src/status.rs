//! Status enums shared across the gateway's wire shapes.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a reservation as seen by clients.
///
/// A reservation returned from the gateway always carries one of these;
/// the default before any payment exists is [`ReservationStatus::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Created, no payment recorded yet.
    #[default]
    Reserved,
    /// A payment in PAID state is attached.
    Paid,
    /// Canceled, or its payment was reversed or canceled.
    Canceled,
}

/// Status of a payment record in the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Reversed,
    Canceled,
}

/// Loyalty program tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoyaltyStatus {
    Bronze,
    Silver,
    Gold,
}

impl From<PaymentStatus> for ReservationStatus {
    /// A paid payment makes the reservation PAID; a reversed or canceled
    /// payment means the reservation is no longer paid for.
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => ReservationStatus::Paid,
            PaymentStatus::Reversed | PaymentStatus::Canceled => ReservationStatus::Canceled,
        }
    }
}

impl ReservationStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Reserved => "RESERVED",
            ReservationStatus::Paid => "PAID",
            ReservationStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Reversed => "REVERSED",
            PaymentStatus::Canceled => "CANCELED",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for LoyaltyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoyaltyStatus::Bronze => "BRONZE",
            LoyaltyStatus::Silver => "SILVER",
            LoyaltyStatus::Gold => "GOLD",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_use_screaming_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Reserved).unwrap(),
            "\"RESERVED\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Reversed).unwrap(),
            "\"REVERSED\""
        );
        assert_eq!(
            serde_json::to_string(&LoyaltyStatus::Gold).unwrap(),
            "\"GOLD\""
        );
    }

    #[test]
    fn payment_status_maps_into_reservation_status() {
        assert_eq!(
            ReservationStatus::from(PaymentStatus::Paid),
            ReservationStatus::Paid
        );
        assert_eq!(
            ReservationStatus::from(PaymentStatus::Reversed),
            ReservationStatus::Canceled
        );
        assert_eq!(
            ReservationStatus::from(PaymentStatus::Canceled),
            ReservationStatus::Canceled
        );
    }

    #[test]
    fn default_status_is_reserved() {
        assert_eq!(ReservationStatus::default(), ReservationStatus::Reserved);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result: Result<PaymentStatus, _> = serde_json::from_str("\"PENDING\"");
        assert!(result.is_err());
    }
}
