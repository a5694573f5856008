//! Backend service clients for the hotel booking gateway.
//!
//! One trait per backend service (reservation, payment, loyalty), each
//! with an HTTP implementation built on a shared typed client and an
//! in-memory double for tests. Failure classification happens once, in
//! [`http::HttpClient`]; callers above this crate never re-interpret
//! transport errors.

pub mod error;
pub mod http;
pub mod loyalty;
pub mod payment;
pub mod reservation;

pub use error::BackendError;
pub use http::HttpClient;
pub use loyalty::{HttpLoyaltyApi, InMemoryLoyaltyApi, LoyaltyApi, RawLoyaltyResponse};
pub use payment::{HttpPaymentApi, InMemoryPaymentApi, PaymentApi};
pub use reservation::{HttpReservationApi, InMemoryReservationApi, ReservationApi};
