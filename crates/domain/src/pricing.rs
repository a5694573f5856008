//! Stay pricing: nights, totals and loyalty discount application.
//!
//! Pure local computation; no backend is involved.

use chrono::NaiveDate;

/// Number of nights between two calendar dates (whole days).
///
/// Negative if `end` precedes `start`; request validation rejects that
/// before pricing ever runs.
pub fn nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Total stay price before any discount.
pub fn total_price(nightly: f64, nights: i64) -> f64 {
    nightly * nights as f64
}

/// Applies a percentage discount: `total * (1 - discount/100)`.
///
/// Returned as computed; no rounding policy is applied.
pub fn apply_discount(total: f64, discount_percent: f64) -> f64 {
    total * (1.0 - discount_percent / 100.0)
}
