//! Reservation service client: trait, HTTP implementation and in-memory
//! test double.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{ReservationUid, Username};
use domain::{CreatedReservation, Hotel, HotelPage, HotelRecord, NewReservation, ReservationRecord};

use crate::error::BackendError;
use crate::http::HttpClient;

/// Operations of the reservation service consumed by the gateway.
#[async_trait]
pub trait ReservationApi: Send + Sync {
    /// Paginated hotel listing, returned verbatim.
    async fn list_hotels(&self, page: u32, size: u32) -> Result<HotelPage, BackendError>;

    /// All reservations owned by the user.
    async fn list_reservations(
        &self,
        user: &Username,
    ) -> Result<Vec<ReservationRecord>, BackendError>;

    /// One reservation by identifier, scoped to the user.
    async fn get_reservation(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<ReservationRecord, BackendError>;

    /// Creates a reservation; the response carries the nightly price.
    async fn create_reservation(
        &self,
        user: &Username,
        request: &NewReservation,
    ) -> Result<CreatedReservation, BackendError>;

    /// Deletes a reservation, scoped to the user.
    async fn delete_reservation(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<(), BackendError>;
}

/// Reservation service client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReservationApi {
    http: HttpClient,
    base_url: String,
}

impl HttpReservationApi {
    /// Creates a client against the given base URL.
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn list_hotels(&self, page: u32, size: u32) -> Result<HotelPage, BackendError> {
        let url = format!("{}/hotels", self.base_url);
        self.http
            .get_json_with_query(&url, &[("page", page), ("size", size)], None)
            .await
    }

    async fn list_reservations(
        &self,
        user: &Username,
    ) -> Result<Vec<ReservationRecord>, BackendError> {
        let url = format!("{}/reservations", self.base_url);
        self.http.get_json(&url, Some(user)).await
    }

    async fn get_reservation(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<ReservationRecord, BackendError> {
        let url = format!("{}/reservations/{uid}", self.base_url);
        self.http.get_json(&url, Some(user)).await
    }

    async fn create_reservation(
        &self,
        user: &Username,
        request: &NewReservation,
    ) -> Result<CreatedReservation, BackendError> {
        let url = format!("{}/reservations", self.base_url);
        self.http.post_json(&url, Some(user), request).await
    }

    async fn delete_reservation(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<(), BackendError> {
        let url = format!("{}/reservations/{uid}", self.base_url);
        self.http.delete(&url, Some(user)).await
    }
}

#[derive(Debug, Default)]
struct InMemoryReservationState {
    hotels: Vec<Hotel>,
    reservations: HashMap<Username, Vec<ReservationRecord>>,
    fail_on_list: bool,
    fail_on_create: bool,
    fail_on_delete: bool,
    calls: usize,
}

/// In-memory reservation service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationApi {
    state: Arc<RwLock<InMemoryReservationState>>,
}

impl InMemoryReservationApi {
    /// Creates an empty in-memory reservation service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hotel to the listing (and to creation lookups).
    pub fn add_hotel(&self, hotel: Hotel) {
        self.state.write().unwrap().hotels.push(hotel);
    }

    /// Seeds an existing reservation for a user.
    pub fn seed_reservation(&self, user: &Username, record: ReservationRecord) {
        self.state
            .write()
            .unwrap()
            .reservations
            .entry(user.clone())
            .or_default()
            .push(record);
    }

    /// Configures read calls to fail as unreachable.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.state.write().unwrap().fail_on_list = fail;
    }

    /// Configures creation calls to fail as unreachable.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures deletion calls to fail as unreachable.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Number of reservations currently held for a user.
    pub fn reservation_count(&self, user: &Username) -> usize {
        self.state
            .read()
            .unwrap()
            .reservations
            .get(user)
            .map_or(0, Vec::len)
    }

    /// Total number of calls received, across all methods.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls
    }
}

#[async_trait]
impl ReservationApi for InMemoryReservationApi {
    async fn list_hotels(&self, page: u32, size: u32) -> Result<HotelPage, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_list {
            return Err(BackendError::Unavailable);
        }

        let page = page.max(1);
        let skip = ((page - 1) * size) as usize;
        let items: Vec<Hotel> = state
            .hotels
            .iter()
            .skip(skip)
            .take(size as usize)
            .cloned()
            .collect();
        Ok(HotelPage {
            page,
            page_size: size,
            total_elements: state.hotels.len() as u64,
            items,
        })
    }

    async fn list_reservations(
        &self,
        user: &Username,
    ) -> Result<Vec<ReservationRecord>, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_list {
            return Err(BackendError::Unavailable);
        }
        Ok(state.reservations.get(user).cloned().unwrap_or_default())
    }

    async fn get_reservation(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<ReservationRecord, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_list {
            return Err(BackendError::Unavailable);
        }
        state
            .reservations
            .get(user)
            .and_then(|records| records.iter().find(|r| r.reservation_uid == uid))
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn create_reservation(
        &self,
        user: &Username,
        request: &NewReservation,
    ) -> Result<CreatedReservation, BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_create {
            return Err(BackendError::Unavailable);
        }

        let hotel = state
            .hotels
            .iter()
            .find(|h| h.hotel_uid == request.hotel_uid)
            .cloned()
            .ok_or(BackendError::NotFound)?;

        let record = ReservationRecord {
            reservation_uid: ReservationUid::new(),
            hotel: HotelRecord {
                hotel_uid: hotel.hotel_uid,
                name: hotel.name,
                country: hotel.country,
                city: hotel.city,
                address: hotel.address,
                stars: hotel.stars,
            },
            start_date: request.start_date,
            end_date: request.end_date,
        };
        let created = CreatedReservation {
            reservation_uid: record.reservation_uid,
            hotel_uid: hotel.hotel_uid,
            start_date: request.start_date,
            end_date: request.end_date,
            price: hotel.price,
        };

        state
            .reservations
            .entry(user.clone())
            .or_default()
            .push(record);
        Ok(created)
    }

    async fn delete_reservation(
        &self,
        user: &Username,
        uid: ReservationUid,
    ) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail_on_delete {
            return Err(BackendError::Unavailable);
        }

        let records = state
            .reservations
            .get_mut(user)
            .ok_or(BackendError::NotFound)?;
        let before = records.len();
        records.retain(|r| r.reservation_uid != uid);
        if records.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::HotelUid;

    use super::*;

    fn hotel() -> Hotel {
        Hotel {
            hotel_uid: HotelUid::new(),
            name: "Test".to_string(),
            country: "IT".to_string(),
            city: "Rome".to_string(),
            address: "Via 1".to_string(),
            stars: 3,
            price: 100.0,
        }
    }

    fn booking(hotel_uid: HotelUid) -> NewReservation {
        NewReservation {
            hotel_uid,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_then_get_and_delete() {
        let api = InMemoryReservationApi::new();
        let hotel = hotel();
        let hotel_uid = hotel.hotel_uid;
        api.add_hotel(hotel);
        let user = Username::from("alice");

        let created = api
            .create_reservation(&user, &booking(hotel_uid))
            .await
            .unwrap();
        assert_eq!(created.price, 100.0);
        assert_eq!(api.reservation_count(&user), 1);

        let fetched = api
            .get_reservation(&user, created.reservation_uid)
            .await
            .unwrap();
        assert_eq!(fetched.hotel.city, "Rome");

        api.delete_reservation(&user, created.reservation_uid)
            .await
            .unwrap();
        assert_eq!(api.reservation_count(&user), 0);
    }

    #[tokio::test]
    async fn unknown_hotel_is_not_found() {
        let api = InMemoryReservationApi::new();
        let user = Username::from("alice");
        let result = api.create_reservation(&user, &booking(HotelUid::new())).await;
        assert_eq!(result.unwrap_err(), BackendError::NotFound);
    }

    #[tokio::test]
    async fn delete_of_unknown_reservation_is_not_found() {
        let api = InMemoryReservationApi::new();
        let user = Username::from("alice");
        let result = api.delete_reservation(&user, ReservationUid::new()).await;
        assert_eq!(result.unwrap_err(), BackendError::NotFound);
    }

    #[tokio::test]
    async fn hotel_listing_paginates() {
        let api = InMemoryReservationApi::new();
        for _ in 0..5 {
            api.add_hotel(hotel());
        }

        let page = api.list_hotels(2, 2).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn fail_toggle_reports_unavailable() {
        let api = InMemoryReservationApi::new();
        api.set_fail_on_list(true);
        let result = api.list_reservations(&Username::from("alice")).await;
        assert_eq!(result.unwrap_err(), BackendError::Unavailable);
    }
}
