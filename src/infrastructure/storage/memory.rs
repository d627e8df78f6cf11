//! In-memory repository provider
//!
//! Backs every repository trait with `DashMap`s. Used by tests and for
//! running the engine without a database.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use dashmap::DashMap;

use crate::domain::{
    Booking, BookingLedger, BookingStatus, CampaignRepository, CampaignWindow, DomainError,
    DomainResult, NewBooking, Place, PlaceRepository, RepositoryProvider, Service,
    ServiceCatalog, StaffMember, StaffRepository, TimeOffPeriod, TimeOffRepository,
};

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    places: DashMap<i32, Place>,
    services: DashMap<i32, Service>,
    staff: DashMap<i32, StaffMember>,
    time_off: DashMap<i32, TimeOffPeriod>,
    campaigns: DashMap<i32, CampaignWindow>,
    bookings: DashMap<i64, Booking>,
    booking_counter: AtomicI64,
    /// Serialises ledger writes so check-then-insert is atomic
    ledger_gate: Mutex<()>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            places: DashMap::new(),
            services: DashMap::new(),
            staff: DashMap::new(),
            time_off: DashMap::new(),
            campaigns: DashMap::new(),
            bookings: DashMap::new(),
            booking_counter: AtomicI64::new(1),
            ledger_gate: Mutex::new(()),
        }
    }

    pub fn insert_place(&self, place: Place) {
        self.places.insert(place.id, place);
    }

    pub fn insert_service(&self, service: Service) {
        self.services.insert(service.id, service);
    }

    pub fn insert_staff(&self, staff: StaffMember) {
        self.staff.insert(staff.id, staff);
    }

    pub fn insert_time_off(&self, period: TimeOffPeriod) {
        self.time_off.insert(period.id, period);
    }

    pub fn insert_campaign(&self, campaign: CampaignWindow) {
        self.campaigns.insert(campaign.id, campaign);
    }

    /// Write a booking without any overlap check (fixtures, imports)
    pub fn insert_booking_unchecked(&self, booking: NewBooking) -> Booking {
        let id = self.booking_counter.fetch_add(1, Ordering::SeqCst);
        let booking = booking.into_booking(id, Utc::now());
        self.bookings.insert(id, booking.clone());
        booking
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    fn active_for_staff_on(&self, staff_id: i32, date: NaiveDate) -> Vec<Booking> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.staff_id == staff_id && b.date == date && b.status.blocks_slot())
            .map(|b| b.clone())
            .collect();
        found.sort_by_key(|b| (b.start, b.id));
        found
    }

    fn lock_ledger(&self) -> DomainResult<std::sync::MutexGuard<'_, ()>> {
        self.ledger_gate
            .lock()
            .map_err(|_| DomainError::Storage("ledger lock poisoned".into()))
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaceRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Place>> {
        Ok(self.places.get(&id).map(|p| p.clone()))
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryRepositoryProvider {
    async fn find_for_place(&self, place_id: i32) -> DomainResult<Vec<Service>> {
        let mut found: Vec<Service> = self
            .services
            .iter()
            .filter(|s| s.place_id == place_id)
            .map(|s| s.clone())
            .collect();
        found.sort_by_key(|s| s.id);
        Ok(found)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Service>> {
        let mut found: Vec<Service> = ids
            .iter()
            .filter_map(|id| self.services.get(id).map(|s| s.clone()))
            .collect();
        found.sort_by_key(|s| s.id);
        found.dedup_by_key(|s| s.id);
        Ok(found)
    }
}

#[async_trait]
impl StaffRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<StaffMember>> {
        Ok(self.staff.get(&id).map(|s| s.clone()))
    }

    async fn find_for_place(&self, place_id: i32) -> DomainResult<Vec<StaffMember>> {
        let mut found: Vec<StaffMember> = self
            .staff
            .iter()
            .filter(|s| s.place_id == place_id)
            .map(|s| s.clone())
            .collect();
        found.sort_by_key(|s| s.id);
        Ok(found)
    }
}

#[async_trait]
impl TimeOffRepository for InMemoryRepositoryProvider {
    async fn find_overlapping(
        &self,
        staff_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> DomainResult<Vec<TimeOffPeriod>> {
        let mut found: Vec<TimeOffPeriod> = self
            .time_off
            .iter()
            .filter(|p| p.staff_id == staff_id && p.starts_at < to && from < p.ends_at)
            .map(|p| p.clone())
            .collect();
        found.sort_by_key(|p| (p.starts_at, p.id));
        Ok(found)
    }
}

#[async_trait]
impl CampaignRepository for InMemoryRepositoryProvider {
    async fn find_active(
        &self,
        place_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> DomainResult<Vec<CampaignWindow>> {
        let mut found: Vec<CampaignWindow> = self
            .campaigns
            .iter()
            .filter(|c| c.place_id == place_id && c.starts_at < to && from < c.ends_at)
            .map(|c| c.clone())
            .collect();
        found.sort_by_key(|c| c.id);
        Ok(found)
    }
}

#[async_trait]
impl BookingLedger for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_active_for_staff_on(
        &self,
        staff_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self.active_for_staff_on(staff_id, date))
    }

    async fn find_for_place_on(
        &self,
        place_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.place_id == place_id && b.date == date)
            .map(|b| b.clone())
            .collect();
        found.sort_by_key(|b| (b.staff_id, b.start, b.id));
        Ok(found)
    }

    async fn insert_exclusive(&self, booking: NewBooking) -> DomainResult<Booking> {
        let interval = booking.interval().ok_or_else(|| {
            DomainError::InvalidDuration(format!(
                "{} minutes from {} does not fit the day",
                booking.duration_minutes, booking.start
            ))
        })?;

        let _gate = self.lock_ledger()?;

        let taken = self
            .active_for_staff_on(booking.staff_id, booking.date)
            .iter()
            .any(|existing| existing.occupies(&interval));
        if taken {
            return Err(DomainError::SlotConflict {
                staff_id: booking.staff_id,
                date: booking.date,
                start: booking.start,
            });
        }

        Ok(self.insert_booking_unchecked(booking))
    }

    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<bool> {
        let _gate = self.lock_ledger()?;
        let mut booking = self
            .bookings
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Booking", id))?;
        if booking.status != from {
            return Ok(false);
        }
        booking.status = to;
        Ok(true)
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn places(&self) -> &dyn PlaceRepository {
        self
    }

    fn services(&self) -> &dyn ServiceCatalog {
        self
    }

    fn staff(&self) -> &dyn StaffRepository {
        self
    }

    fn time_off(&self) -> &dyn TimeOffRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingLedger {
        self
    }

    fn campaigns(&self) -> &dyn CampaignRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerInfo, OpeningHours};
    use rust_decimal::Decimal;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn new_booking(staff_id: i32, start: &str, minutes: u32) -> NewBooking {
        NewBooking {
            place_id: 1,
            service_ids: vec![1],
            staff_id,
            date: date(),
            start: start.parse().unwrap(),
            duration_minutes: minutes,
            total_price: Decimal::ZERO,
            status: BookingStatus::Pending,
            customer: CustomerInfo {
                name: "Lee".into(),
                phone: "555".into(),
                email: None,
            },
            campaign_id: None,
        }
    }

    #[tokio::test]
    async fn insert_exclusive_rejects_overlap_for_same_staff() {
        let repos = InMemoryRepositoryProvider::new();
        repos.insert_exclusive(new_booking(1, "10:00", 30)).await.unwrap();

        let err = repos
            .insert_exclusive(new_booking(1, "10:15", 15))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SlotConflict { staff_id: 1, .. }));

        // Other staff and adjacent intervals are fine
        repos.insert_exclusive(new_booking(2, "10:15", 15)).await.unwrap();
        repos.insert_exclusive(new_booking(1, "10:30", 30)).await.unwrap();
        assert_eq!(repos.booking_count(), 3);
    }

    #[tokio::test]
    async fn cancelled_booking_frees_interval() {
        let repos = InMemoryRepositoryProvider::new();
        let first = repos.insert_exclusive(new_booking(1, "10:00", 30)).await.unwrap();
        assert!(repos
            .update_status(first.id, BookingStatus::Pending, BookingStatus::Cancelled)
            .await
            .unwrap());

        repos.insert_exclusive(new_booking(1, "10:00", 30)).await.unwrap();
        assert_eq!(repos.find_active_for_staff_on(1, date()).await.unwrap().len(), 1);
        assert_eq!(repos.find_for_place_on(1, date()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_status_of_unknown_booking_is_not_found() {
        let repos = InMemoryRepositoryProvider::new();
        let err = repos
            .update_status(99, BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Booking", .. }));
    }

    #[tokio::test]
    async fn stale_status_write_is_refused() {
        let repos = InMemoryRepositoryProvider::new();
        let booking = repos.insert_exclusive(new_booking(1, "10:00", 30)).await.unwrap();

        assert!(repos
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Completed)
            .await
            .unwrap());
        assert!(!repos
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Cancelled)
            .await
            .unwrap());
        let stored = BookingLedger::find_by_id(&repos, booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn place_lookup_and_catalog_order() {
        let repos = InMemoryRepositoryProvider::new();
        repos.insert_place(Place::new(1, "Studio", OpeningHours::closed()));
        repos.insert_service(Service::new(2, 1, "B", 15, Decimal::ONE));
        repos.insert_service(Service::new(1, 1, "A", 15, Decimal::ONE));
        repos.insert_service(Service::new(3, 2, "Other", 15, Decimal::ONE));

        assert!(PlaceRepository::find_by_id(&repos, 1).await.unwrap().is_some());
        let ids: Vec<i32> = ServiceCatalog::find_for_place(&repos, 1)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(repos.find_by_ids(&[3, 1, 3]).await.unwrap().len(), 2);
    }
}
