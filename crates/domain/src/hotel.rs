//! Hotel shapes: the full listing shape and the condensed form embedded
//! in reservations.

use common::HotelUid;
use serde::{Deserialize, Serialize};

/// Full hotel shape as returned by the reservation service's listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub hotel_uid: HotelUid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub stars: u8,
    /// Nightly price.
    pub price: f64,
}

/// Hotel fields as embedded in a reservation by the reservation service,
/// with separate location fields. Condensed into [`HotelInfo`] before a
/// reservation leaves the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    pub hotel_uid: HotelUid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub stars: u8,
}

/// Condensed hotel view embedded in client-facing reservations: the
/// location fields collapse into one display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelInfo {
    pub hotel_uid: HotelUid,
    pub name: String,
    pub full_address: String,
    pub stars: u8,
}

impl From<HotelRecord> for HotelInfo {
    fn from(hotel: HotelRecord) -> Self {
        let full_address = format!("{}, {}, {}", hotel.country, hotel.city, hotel.address);
        Self {
            hotel_uid: hotel.hotel_uid,
            name: hotel.name,
            full_address,
            stars: hotel.stars,
        }
    }
}

/// Paginated hotel listing envelope, passed through from the reservation
/// service verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPage {
    pub page: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub items: Vec<Hotel>,
}
