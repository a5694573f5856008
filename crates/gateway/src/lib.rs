//! Orchestration core of the hotel booking gateway.
//!
//! The [`Gateway`] fans out to the reservation, payment and loyalty
//! services, merges partial responses into client-facing composites,
//! and runs the two multi-step write workflows:
//!
//! 1. Booking: create reservation → price the stay → apply loyalty
//!    discount → create payment → record the reservation with loyalty.
//! 2. Cancel: delete the reservation, then reconcile its payment.
//!
//! Neither workflow compensates completed steps on a later failure;
//! partial-failure states are logged as needing reconciliation and the
//! observable outcome is preserved.

pub mod booking;
pub mod cancel;
pub mod orchestrator;

pub use cancel::CancelOutcome;
pub use orchestrator::{Gateway, UserProfile};
