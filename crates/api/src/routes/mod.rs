//! Route handlers.

pub mod health;
pub mod hotels;
pub mod metrics;
pub mod reservations;
pub mod users;
