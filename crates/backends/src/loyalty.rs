//! Loyalty service client: trait, HTTP implementation and in-memory
//! test double.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::Username;
use domain::Loyalty;

use crate::error::BackendError;
use crate::http::HttpClient;

/// An upstream loyalty response forwarded without normalization: the
/// status code and JSON body exactly as the loyalty service produced
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLoyaltyResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Operations of the loyalty service consumed by the gateway.
#[async_trait]
pub trait LoyaltyApi: Send + Sync {
    /// The user's loyalty record.
    async fn get_loyalty(&self, user: &Username) -> Result<Loyalty, BackendError>;

    /// Notifies the loyalty service of a completed reservation.
    ///
    /// The effect (count and possibly tier advance) is determined by the
    /// service.
    async fn record_reservation(&self, user: &Username) -> Result<(), BackendError>;

    /// Raw passthrough lookup; upstream status is not classified.
    ///
    /// Forwards whatever identity it was given, including none; the
    /// upstream decides how to answer an unidentified request.
    async fn fetch_raw(&self, user: Option<&Username>) -> Result<RawLoyaltyResponse, BackendError>;
}

/// Loyalty service client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLoyaltyApi {
    http: HttpClient,
    base_url: String,
}

impl HttpLoyaltyApi {
    /// Creates a client against the given base URL.
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LoyaltyApi for HttpLoyaltyApi {
    async fn get_loyalty(&self, user: &Username) -> Result<Loyalty, BackendError> {
        let url = format!("{}/loyalty", self.base_url);
        self.http.get_json(&url, Some(user)).await
    }

    async fn record_reservation(&self, user: &Username) -> Result<(), BackendError> {
        let url = format!("{}/loyalty", self.base_url);
        self.http.post_empty(&url, Some(user)).await
    }

    async fn fetch_raw(&self, user: Option<&Username>) -> Result<RawLoyaltyResponse, BackendError> {
        let url = format!("{}/loyalty", self.base_url);
        let (status, body) = self.http.get_raw(&url, user).await?;
        Ok(RawLoyaltyResponse { status, body })
    }
}

#[derive(Debug, Default)]
struct InMemoryLoyaltyState {
    records: HashMap<Username, Loyalty>,
    fail_on_get: bool,
    fail_on_record: bool,
    calls: usize,
}

/// In-memory loyalty service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoyaltyApi {
    state: Arc<RwLock<InMemoryLoyaltyState>>,
}

impl InMemoryLoyaltyApi {
    /// Creates an empty in-memory loyalty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a loyalty record for a user.
    pub fn set_loyalty(&self, user: &Username, loyalty: Loyalty) {
        self.state
            .write()
            .unwrap()
            .records
            .insert(user.clone(), loyalty);
    }

    /// Configures lookups to fail as unreachable.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.state.write().unwrap().fail_on_get = fail;
    }

    /// Configures reservation recording to fail as unreachable.
    pub fn set_fail_on_record(&self, fail: bool) {
        self.state.write().unwrap().fail_on_record = fail;
    }

    /// Reservation count currently recorded for a user.
    pub fn reservation_count(&self, user: &Username) -> u32 {
        self.state
            .read()
            .unwrap()
            .records
            .get(user)
            .map_or(0, |l| l.reservation_count)
    }

    /// Total number of calls received, across all methods.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls
    }
}

#[async_trait]
impl LoyaltyApi for InMemoryLoyaltyApi {
    async fn get_loyalty(&self, user: &Username) -> Result<Loyalty, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_get {
            return Err(BackendError::Unavailable);
        }
        state
            .records
            .get(user)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn record_reservation(&self, user: &Username) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_record {
            return Err(BackendError::Unavailable);
        }
        let record = state.records.get_mut(user).ok_or(BackendError::NotFound)?;
        record.reservation_count += 1;
        Ok(())
    }

    async fn fetch_raw(&self, user: Option<&Username>) -> Result<RawLoyaltyResponse, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_get {
            return Err(BackendError::Unavailable);
        }
        match user.and_then(|user| state.records.get(user)) {
            Some(loyalty) => Ok(RawLoyaltyResponse {
                status: 200,
                body: serde_json::to_value(loyalty)
                    .map_err(|e| BackendError::Internal(e.to_string()))?,
            }),
            None => Ok(RawLoyaltyResponse {
                status: 404,
                body: serde_json::json!({ "message": "Loyalty record not found" }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::LoyaltyStatus;

    use super::*;

    fn bronze() -> Loyalty {
        Loyalty {
            status: LoyaltyStatus::Bronze,
            discount: 5.0,
            reservation_count: 3,
        }
    }

    #[tokio::test]
    async fn get_returns_seeded_record() {
        let api = InMemoryLoyaltyApi::new();
        let user = Username::from("alice");
        api.set_loyalty(&user, bronze());

        let loyalty = api.get_loyalty(&user).await.unwrap();
        assert_eq!(loyalty.discount, 5.0);
    }

    #[tokio::test]
    async fn record_advances_the_count() {
        let api = InMemoryLoyaltyApi::new();
        let user = Username::from("alice");
        api.set_loyalty(&user, bronze());

        api.record_reservation(&user).await.unwrap();
        assert_eq!(api.reservation_count(&user), 4);
    }

    #[tokio::test]
    async fn raw_fetch_forwards_status_for_unknown_user() {
        let api = InMemoryLoyaltyApi::new();
        let raw = api
            .fetch_raw(Some(&Username::from("nobody")))
            .await
            .unwrap();
        assert_eq!(raw.status, 404);
    }

    #[tokio::test]
    async fn raw_fetch_without_identity_still_reaches_the_service() {
        let api = InMemoryLoyaltyApi::new();
        let raw = api.fetch_raw(None).await.unwrap();
        assert_eq!(raw.status, 404);
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn raw_fetch_returns_record_for_known_user() {
        let api = InMemoryLoyaltyApi::new();
        let user = Username::from("alice");
        api.set_loyalty(&user, bronze());

        let raw = api.fetch_raw(Some(&user)).await.unwrap();
        assert_eq!(raw.status, 200);
        assert_eq!(raw.body["status"], "BRONZE");
    }

    #[tokio::test]
    async fn fail_toggle_reports_unavailable() {
        let api = InMemoryLoyaltyApi::new();
        api.set_fail_on_get(true);
        let result = api.get_loyalty(&Username::from("alice")).await;
        assert_eq!(result.unwrap_err(), BackendError::Unavailable);
    }
}
