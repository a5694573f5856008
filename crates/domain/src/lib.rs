//! Entity types and pure policy for the hotel booking gateway.
//!
//! Everything here is transient and request-scoped: the backends own the
//! data, the gateway holds ephemeral copies for the duration of one
//! request. Deserialization produces typed backend shapes; the merge
//! policy ([`merge`]) and stay pricing ([`pricing`]) are pure functions
//! over those shapes, so each is testable without any I/O.

pub mod hotel;
pub mod loyalty;
pub mod merge;
pub mod payment;
pub mod pricing;
pub mod reservation;
pub mod status;

pub use hotel::{Hotel, HotelInfo, HotelPage, HotelRecord};
pub use loyalty::Loyalty;
pub use merge::merge_reservation;
pub use payment::{NewPayment, Payment, PaymentSlot, PaymentView};
pub use reservation::{BookingConfirmation, CreatedReservation, NewReservation, Reservation, ReservationRecord};
pub use status::{LoyaltyStatus, PaymentStatus, ReservationStatus};
