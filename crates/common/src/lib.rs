//! Shared identifier types used across the gateway crates.

pub mod types;

pub use types::{HotelUid, PaymentUid, ReservationUid, USER_HEADER, Username};
