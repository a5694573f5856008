//! Loyalty program record.

use serde::{Deserialize, Serialize};

use crate::status::LoyaltyStatus;

/// A user's loyalty record, owned by the loyalty service.
///
/// One record per user; the tier, discount and count advance as a side
/// effect of completed reservations. The gateway never creates or
/// deletes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loyalty {
    pub status: LoyaltyStatus,
    /// Discount percentage applied to reservation totals.
    pub discount: f64,
    pub reservation_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_shape() {
        let json = serde_json::json!({
            "status": "SILVER",
            "discount": 7.0,
            "reservationCount": 12,
        });
        let loyalty: Loyalty = serde_json::from_value(json).unwrap();
        assert_eq!(loyalty.status, LoyaltyStatus::Silver);
        assert_eq!(loyalty.discount, 7.0);
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let json = serde_json::json!({
            "status": "PLATINUM",
            "discount": 15.0,
            "reservationCount": 100,
        });
        let result: Result<Loyalty, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }
}
