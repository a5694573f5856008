//! The orchestrator: fan-out, merge and the write workflows.

use backends::{
    BackendError, LoyaltyApi, PaymentApi, RawLoyaltyResponse, ReservationApi,
};
use common::{ReservationUid, Username};
use domain::{
    BookingConfirmation, HotelPage, Loyalty, NewPayment, NewReservation, PaymentSlot,
    PaymentStatus, PaymentView, Reservation, ReservationStatus, merge_reservation, pricing,
};
use serde::Serialize;

use crate::booking;
use crate::cancel::CancelOutcome;

/// User profile envelope: reservations merged with payments, plus the
/// loyalty record, under one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub reservations: Vec<Reservation>,
    pub loyalty: Loyalty,
}

/// Orchestrates gateway operations across the three backend services.
///
/// Each inbound request gets its own logical task; within one request
/// backend calls run sequentially, since each call's result may feed
/// the next. Errors arrive pre-classified from the backend clients and
/// are propagated unchanged.
pub struct Gateway<R, P, L>
where
    R: ReservationApi,
    P: PaymentApi,
    L: LoyaltyApi,
{
    reservations: R,
    payments: P,
    loyalty: L,
}

impl<R, P, L> Gateway<R, P, L>
where
    R: ReservationApi,
    P: PaymentApi,
    L: LoyaltyApi,
{
    /// Creates a gateway over the three backend clients.
    pub fn new(reservations: R, payments: P, loyalty: L) -> Self {
        Self {
            reservations,
            payments,
            loyalty,
        }
    }

    /// Paginated hotel listing; the backend envelope passes through
    /// verbatim.
    pub async fn list_hotels(&self, page: u32, size: u32) -> Result<HotelPage, BackendError> {
        self.reservations.list_hotels(page, size).await
    }

    /// All of the user's reservations, each independently merged with
    /// its payment record.
    #[tracing::instrument(skip(self), fields(user = %user))]
    pub async fn list_reservations(
        &self,
        user: &Username,
    ) -> Result<Vec<Reservation>, BackendError> {
        let records = self.reservations.list_reservations(user).await?;

        let mut merged = Vec::with_capacity(records.len());
        for record in records {
            let payment = self.payments.find_payment(user, record.reservation_uid).await?;
            merged.push(merge_reservation(record, payment));
        }
        Ok(merged)
    }

    /// One reservation, merged with its payment record.
    #[tracing::instrument(skip(self), fields(user = %user))]
    pub async fn get_reservation(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<Reservation, BackendError> {
        let record = self.reservations.get_reservation(user, uid).await?;
        let payment = self.payments.find_payment(user, record.reservation_uid).await?;
        Ok(merge_reservation(record, payment))
    }

    /// Reservations and loyalty under one envelope. The two lookups are
    /// independent but run sequentially.
    #[tracing::instrument(skip(self), fields(user = %user))]
    pub async fn get_profile(&self, user: &Username) -> Result<UserProfile, BackendError> {
        let reservations = self.list_reservations(user).await?;
        let loyalty = self.loyalty.get_loyalty(user).await?;
        Ok(UserProfile {
            reservations,
            loyalty,
        })
    }

    /// Raw loyalty passthrough; the upstream status code is forwarded
    /// unchanged, and a missing identity is forwarded as-is rather than
    /// rejected. Only transport unreachability surfaces as an error.
    pub async fn loyalty_passthrough(
        &self,
        user: Option<&Username>,
    ) -> Result<RawLoyaltyResponse, BackendError> {
        self.loyalty.fetch_raw(user).await
    }

    /// Runs the booking workflow.
    ///
    /// Linear, forward-only: a failure never rolls back completed steps.
    /// A reservation that exists upstream without its payment is logged
    /// as needing reconciliation, and the composite returned to the
    /// client then carries status RESERVED with an empty payment.
    #[tracing::instrument(skip(self, request), fields(workflow = booking::WORKFLOW, user = %user))]
    pub async fn book(
        &self,
        user: &Username,
        request: &NewReservation,
    ) -> Result<BookingConfirmation, BackendError> {
        metrics::counter!("booking_total").increment(1);
        let workflow_start = std::time::Instant::now();

        // Step 1: create the reservation. Failure aborts the workflow
        // before any other effect.
        let created = match self.reservations.create_reservation(user, request).await {
            Ok(created) => created,
            Err(e) => {
                metrics::counter!("booking_failed").increment(1);
                tracing::warn!(step = booking::STEP_CREATE_RESERVATION, error = %e, "booking aborted");
                return Err(e);
            }
        };
        tracing::info!(
            step = booking::STEP_CREATE_RESERVATION,
            reservation_uid = %created.reservation_uid,
            "booking step completed"
        );

        // Step 2: price the stay. Local computation, no backend call.
        let nights = pricing::nights(created.start_date, created.end_date);
        let total = pricing::total_price(created.price, nights);

        // Step 3: apply the loyalty discount.
        let loyalty = match self.loyalty.get_loyalty(user).await {
            Ok(loyalty) => loyalty,
            Err(e) => {
                metrics::counter!("booking_needs_reconciliation").increment(1);
                tracing::warn!(
                    step = booking::STEP_APPLY_DISCOUNT,
                    reservation_uid = %created.reservation_uid,
                    needs_reconciliation = true,
                    error = %e,
                    "reservation created but discount lookup failed"
                );
                return Err(e);
            }
        };
        let payable = pricing::apply_discount(total, loyalty.discount);
        tracing::info!(
            step = booking::STEP_APPLY_DISCOUNT,
            nights,
            total,
            discount = loyalty.discount,
            payable,
            "booking step completed"
        );

        // Step 4: create the payment.
        let payment_request = NewPayment {
            reservation_uid: created.reservation_uid,
            status: PaymentStatus::Paid,
            price: payable,
        };
        let (status, payment_slot) = match self.payments.create_payment(user, &payment_request).await
        {
            Ok(payment) => {
                tracing::info!(
                    step = booking::STEP_CREATE_PAYMENT,
                    payment_uid = %payment.payment_uid,
                    "booking step completed"
                );

                // Step 5: record the reservation with the loyalty
                // service. Its failure leaves the count behind; logged,
                // not surfaced.
                if let Err(e) = self.loyalty.record_reservation(user).await {
                    metrics::counter!("booking_needs_reconciliation").increment(1);
                    tracing::warn!(
                        step = booking::STEP_RECORD_LOYALTY,
                        reservation_uid = %created.reservation_uid,
                        needs_reconciliation = true,
                        error = %e,
                        "payment created but loyalty update failed"
                    );
                }

                (
                    ReservationStatus::from(payment.status),
                    PaymentSlot::filled(PaymentView::from(payment)),
                )
            }
            Err(e) => {
                // The reservation stays created upstream with no payment
                // attached.
                metrics::counter!("booking_needs_reconciliation").increment(1);
                tracing::warn!(
                    step = booking::STEP_CREATE_PAYMENT,
                    reservation_uid = %created.reservation_uid,
                    needs_reconciliation = true,
                    error = %e,
                    "reservation created but payment failed"
                );
                (ReservationStatus::Reserved, PaymentSlot::empty())
            }
        };

        metrics::histogram!("booking_duration_seconds")
            .record(workflow_start.elapsed().as_secs_f64());

        // Step 6: the internal nightly price never reaches the client;
        // BookingConfirmation has no field for it.
        Ok(BookingConfirmation {
            reservation_uid: created.reservation_uid,
            hotel_uid: created.hotel_uid,
            start_date: created.start_date,
            end_date: created.end_date,
            discount: loyalty.discount,
            status,
            payment: payment_slot,
        })
    }

    /// Runs the two-phase cancel workflow.
    ///
    /// Phase 1 deletes the reservation; phase 2 reconciles its payment.
    /// No compensation: if phase 2 fails after phase 1 committed, the
    /// payment stays orphaned upstream and the outcome reports the
    /// inconsistency.
    #[tracing::instrument(skip(self), fields(user = %user))]
    pub async fn cancel(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<CancelOutcome, BackendError> {
        metrics::counter!("cancel_total").increment(1);

        match self.reservations.delete_reservation(user, uid).await {
            Ok(()) => {}
            // The reservation side never committed; these classifications
            // keep their ordinary meaning.
            Err(e @ (BackendError::NotFound | BackendError::Unavailable)) => return Err(e),
            Err(e) => {
                tracing::warn!(reservation_uid = %uid, error = %e, "reservation deletion did not cleanly succeed");
                return Ok(CancelOutcome::UpstreamInconsistent);
            }
        }

        let payment = match self.payments.find_payment(user, uid).await {
            Ok(payment) => payment,
            Err(e) => {
                metrics::counter!("cancel_needs_reconciliation").increment(1);
                tracing::warn!(
                    reservation_uid = %uid,
                    needs_reconciliation = true,
                    error = %e,
                    "reservation deleted but payment lookup failed"
                );
                return Ok(CancelOutcome::UpstreamInconsistent);
            }
        };

        let Some(payment) = payment else {
            return Ok(CancelOutcome::NoPaymentToReconcile);
        };

        match self.payments.delete_payment(user, payment.payment_uid).await {
            Ok(()) => Ok(CancelOutcome::Completed),
            Err(e) => {
                metrics::counter!("cancel_needs_reconciliation").increment(1);
                tracing::warn!(
                    reservation_uid = %uid,
                    payment_uid = %payment.payment_uid,
                    needs_reconciliation = true,
                    error = %e,
                    "reservation deleted but payment deletion failed"
                );
                Ok(CancelOutcome::UpstreamInconsistent)
            }
        }
    }
}
