//! Booking workflow step names, used in logs and metrics.

/// The workflow identifier for reservation booking.
pub const WORKFLOW: &str = "Booking";

/// Step name: create the reservation in the reservation service.
pub const STEP_CREATE_RESERVATION: &str = "create_reservation";

/// Step name: fetch the loyalty discount and price the stay.
pub const STEP_APPLY_DISCOUNT: &str = "apply_discount";

/// Step name: create the payment record.
pub const STEP_CREATE_PAYMENT: &str = "create_payment";

/// Step name: record the completed reservation with the loyalty service.
pub const STEP_RECORD_LOYALTY: &str = "record_loyalty";
