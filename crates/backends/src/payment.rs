//! Payment service client: trait, HTTP implementation and in-memory
//! test double.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{PaymentUid, ReservationUid, Username};
use domain::{NewPayment, Payment};

use crate::error::BackendError;
use crate::http::HttpClient;

/// Operations of the payment service consumed by the gateway.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    /// Payment record for a reservation, if one exists.
    ///
    /// Both a 404 and an empty body mean "no payment yet"; the merge
    /// policy treats those identically.
    async fn find_payment(
        &self,
        user: &Username,
        reservation_uid: ReservationUid,
    ) -> Result<Option<Payment>, BackendError>;

    /// Creates a payment record.
    async fn create_payment(
        &self,
        user: &Username,
        request: &NewPayment,
    ) -> Result<Payment, BackendError>;

    /// Deletes a payment record by its own identifier.
    async fn delete_payment(
        &self,
        user: &Username,
        payment_uid: PaymentUid,
    ) -> Result<(), BackendError>;
}

/// Payment service client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPaymentApi {
    http: HttpClient,
    base_url: String,
}

impl HttpPaymentApi {
    /// Creates a client against the given base URL.
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PaymentApi for HttpPaymentApi {
    async fn find_payment(
        &self,
        user: &Username,
        reservation_uid: ReservationUid,
    ) -> Result<Option<Payment>, BackendError> {
        let url = format!("{}/payment/{reservation_uid}", self.base_url);
        match self.http.get_optional(&url, Some(user)).await {
            Ok(payment) => Ok(payment),
            Err(BackendError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_payment(
        &self,
        user: &Username,
        request: &NewPayment,
    ) -> Result<Payment, BackendError> {
        let url = format!("{}/payment", self.base_url);
        self.http.post_json(&url, Some(user), request).await
    }

    async fn delete_payment(
        &self,
        user: &Username,
        payment_uid: PaymentUid,
    ) -> Result<(), BackendError> {
        let url = format!("{}/payment/{payment_uid}", self.base_url);
        self.http.delete(&url, Some(user)).await
    }
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: HashMap<ReservationUid, Payment>,
    fail_on_find: bool,
    fail_on_create: bool,
    fail_on_delete: bool,
    calls: usize,
}

/// In-memory payment service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentApi {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentApi {
    /// Creates an empty in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing payment for a reservation.
    pub fn seed_payment(&self, reservation_uid: ReservationUid, payment: Payment) {
        self.state
            .write()
            .unwrap()
            .payments
            .insert(reservation_uid, payment);
    }

    /// Configures lookups to fail as unreachable.
    pub fn set_fail_on_find(&self, fail: bool) {
        self.state.write().unwrap().fail_on_find = fail;
    }

    /// Configures creation calls to fail as unreachable.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures deletion calls to fail as unreachable.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Returns the number of payment records held.
    pub fn payment_count(&self) -> usize {
        self.state.read().unwrap().payments.len()
    }

    /// Total number of calls received, across all methods.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls
    }
}

#[async_trait]
impl PaymentApi for InMemoryPaymentApi {
    async fn find_payment(
        &self,
        _user: &Username,
        reservation_uid: ReservationUid,
    ) -> Result<Option<Payment>, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_find {
            return Err(BackendError::Unavailable);
        }
        Ok(state.payments.get(&reservation_uid).cloned())
    }

    async fn create_payment(
        &self,
        _user: &Username,
        request: &NewPayment,
    ) -> Result<Payment, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_create {
            return Err(BackendError::Unavailable);
        }

        let payment = Payment {
            payment_uid: PaymentUid::new(),
            status: request.status,
            price: request.price,
        };
        state
            .payments
            .insert(request.reservation_uid, payment.clone());
        Ok(payment)
    }

    async fn delete_payment(
        &self,
        _user: &Username,
        payment_uid: PaymentUid,
    ) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_delete {
            return Err(BackendError::Unavailable);
        }

        let before = state.payments.len();
        state.payments.retain(|_, p| p.payment_uid != payment_uid);
        if state.payments.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::PaymentStatus;

    use super::*;

    #[tokio::test]
    async fn create_find_delete_roundtrip() {
        let api = InMemoryPaymentApi::new();
        let user = Username::from("alice");
        let reservation_uid = ReservationUid::new();

        let created = api
            .create_payment(
                &user,
                &NewPayment {
                    reservation_uid,
                    status: PaymentStatus::Paid,
                    price: 270.0,
                },
            )
            .await
            .unwrap();
        assert_eq!(api.payment_count(), 1);

        let found = api.find_payment(&user, reservation_uid).await.unwrap();
        assert_eq!(found.unwrap().payment_uid, created.payment_uid);

        api.delete_payment(&user, created.payment_uid).await.unwrap();
        assert_eq!(api.payment_count(), 0);
    }

    #[tokio::test]
    async fn absent_payment_is_none_not_an_error() {
        let api = InMemoryPaymentApi::new();
        let found = api
            .find_payment(&Username::from("alice"), ReservationUid::new())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fail_toggles_report_unavailable() {
        let api = InMemoryPaymentApi::new();
        api.set_fail_on_create(true);

        let result = api
            .create_payment(
                &Username::from("alice"),
                &NewPayment {
                    reservation_uid: ReservationUid::new(),
                    status: PaymentStatus::Paid,
                    price: 100.0,
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), BackendError::Unavailable);
        assert_eq!(api.payment_count(), 0);
    }
}
