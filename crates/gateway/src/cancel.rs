//! Outcome of the two-phase cancel workflow.

/// Tagged result of a reservation cancellation.
///
/// Mapped to an HTTP status only at the API boundary; the orchestrator
/// itself never deals in status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Reservation deleted and its payment deleted too.
    Completed,

    /// Reservation deleted; no payment existed to reconcile.
    NoPaymentToReconcile,

    /// The reservation side and the payment side disagree: either the
    /// reservation deletion did not cleanly succeed, or it did and the
    /// payment could not be reconciled afterwards (leaving an orphaned
    /// payment upstream).
    UpstreamInconsistent,
}

impl CancelOutcome {
    /// Returns the outcome name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelOutcome::Completed => "Completed",
            CancelOutcome::NoPaymentToReconcile => "NoPaymentToReconcile",
            CancelOutcome::UpstreamInconsistent => "UpstreamInconsistent",
        }
    }
}

impl std::fmt::Display for CancelOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_variant() {
        assert_eq!(CancelOutcome::Completed.to_string(), "Completed");
        assert_eq!(
            CancelOutcome::NoPaymentToReconcile.to_string(),
            "NoPaymentToReconcile"
        );
        assert_eq!(
            CancelOutcome::UpstreamInconsistent.to_string(),
            "UpstreamInconsistent"
        );
    }
}
