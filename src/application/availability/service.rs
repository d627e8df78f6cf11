//! Availability calculator
//!
//! Read-only: produces the candidate slots for a place, date and service
//! combination. Results are advisory; the booking commit re-validates
//! everything under its own lock.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::grid::SlotGrid;
use crate::application::schedule::{self, StaffDay};
use crate::domain::calendar::{day_bounds, TimeOfDay, TimeRange};
use crate::domain::catalog::{total_duration_minutes, total_price};
use crate::domain::{CampaignWindow, DomainError, DomainResult, RepositoryProvider, StaffMember};

/// Input of an availability query
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub place_id: i32,
    pub date: NaiveDate,
    /// Non-empty; performed back to back by one staff member
    pub service_ids: Vec<i32>,
    /// Restrict to one staff member, otherwise any eligible one
    pub staff_id: Option<i32>,
    /// Only report starts inside this range
    pub window: Option<TimeRange>,
}

impl AvailabilityQuery {
    pub fn new(place_id: i32, date: NaiveDate, service_ids: Vec<i32>) -> Self {
        Self {
            place_id,
            date,
            service_ids,
            staff_id: None,
            window: None,
        }
    }

    pub fn with_staff(mut self, staff_id: i32) -> Self {
        self.staff_id = Some(staff_id);
        self
    }

    pub fn within(mut self, window: TimeRange) -> Self {
        self.window = Some(window);
        self
    }
}

/// Why a report has no slots at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedReason {
    /// The place has no opening hours on that weekday
    PlaceClosed,
    /// Online booking is switched off for the place
    BookingDisabled,
}

impl ClosedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosedReason::PlaceClosed => "place_closed",
            ClosedReason::BookingDisabled => "booking_disabled",
        }
    }
}

/// One candidate start time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub start: TimeOfDay,
    /// At least one candidate staff member is free for the whole duration
    pub available: bool,
    /// Free candidates, ordered by id
    pub free_staff_ids: Vec<i32>,
    /// Campaigns covering the start instant, ordered by id
    pub campaigns: Vec<CampaignWindow>,
}

impl Slot {
    pub fn free_staff_count(&self) -> usize {
        self.free_staff_ids.len()
    }

    /// Lowest-id campaign; the one a booking at this start would carry
    pub fn primary_campaign(&self) -> Option<&CampaignWindow> {
        self.campaigns.first()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityReport {
    pub place_id: i32,
    pub date: NaiveDate,
    pub service_ids: Vec<i32>,
    pub staff_id: Option<i32>,
    pub total_duration_minutes: u32,
    pub total_price: Decimal,
    pub granularity_minutes: u16,
    pub closed: Option<ClosedReason>,
    pub slots: Vec<Slot>,
}

impl AvailabilityReport {
    pub fn available_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.available)
    }

    pub fn slot_at(&self, start: TimeOfDay) -> Option<&Slot> {
        self.slots.iter().find(|s| s.start == start)
    }
}

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// All candidate slots of the day
    pub async fn compute_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> DomainResult<AvailabilityReport> {
        metrics::counter!("availability_queries_total").increment(1);
        let repos = self.repos.as_ref();

        if query.service_ids.is_empty() {
            return Err(DomainError::InvalidRequest(
                "at least one service is required".into(),
            ));
        }

        let place = schedule::resolve_place(repos, query.place_id).await?;
        let services =
            schedule::resolve_services(repos, &place, &query.service_ids, |id| {
                DomainError::not_found("Service", id)
            })
            .await?;
        let duration = total_duration_minutes(&services);
        let candidates = self.candidates(query, place.id).await?;

        let mut report = AvailabilityReport {
            place_id: place.id,
            date: query.date,
            service_ids: query.service_ids.clone(),
            staff_id: query.staff_id,
            total_duration_minutes: duration,
            total_price: total_price(&services),
            granularity_minutes: place.slot_granularity_minutes,
            closed: None,
            slots: Vec::new(),
        };

        if !place.booking_enabled {
            report.closed = Some(ClosedReason::BookingDisabled);
            return Ok(report);
        }
        let Some(opening) = place.hours_on(query.date).range() else {
            report.closed = Some(ClosedReason::PlaceClosed);
            return Ok(report);
        };

        let mut grid = SlotGrid::new(opening, duration, place.slot_granularity_minutes);
        if let Some(window) = query.window {
            grid = grid.within(window);
        }
        if grid.is_empty() {
            return Ok(report);
        }

        let mut days = Vec::with_capacity(candidates.len());
        for staff in &candidates {
            days.push(StaffDay::load(repos, staff.id, query.date).await?);
        }
        let (day_start, day_end) = day_bounds(query.date);
        let campaigns = repos
            .campaigns()
            .find_active(place.id, day_start, day_end)
            .await?;

        report.slots = grid
            .iter()
            .filter_map(|start| {
                let interval = TimeRange::starting_at(start, duration)?;
                let free_staff_ids: Vec<i32> = days
                    .iter()
                    .filter(|day| day.is_free(&interval))
                    .map(|day| day.staff_id)
                    .collect();
                Some(Slot {
                    start,
                    available: !free_staff_ids.is_empty(),
                    free_staff_ids,
                    campaigns: schedule::campaigns_at(&campaigns, query.date, start),
                })
            })
            .collect();

        debug!(
            place_id = place.id,
            date = %query.date,
            candidates = candidates.len(),
            slots = report.slots.len(),
            available = report.available_slots().count(),
            "Computed availability"
        );

        Ok(report)
    }

    /// Slots whose start falls inside `window`
    pub async fn compute_availability_within(
        &self,
        query: &AvailabilityQuery,
        window: TimeRange,
    ) -> DomainResult<AvailabilityReport> {
        let query = query.clone().within(window);
        self.compute_availability(&query).await
    }

    async fn candidates(
        &self,
        query: &AvailabilityQuery,
        place_id: i32,
    ) -> DomainResult<Vec<StaffMember>> {
        let repos = self.repos.as_ref();
        match query.staff_id {
            Some(staff_id) => {
                let staff = repos
                    .staff()
                    .find_by_id(staff_id)
                    .await?
                    .filter(|s| s.place_id == place_id)
                    .ok_or_else(|| DomainError::not_found("Staff", staff_id))?;
                if !staff.can_perform_all(&query.service_ids) {
                    return Err(DomainError::IneligibleStaff(staff_id));
                }
                Ok(vec![staff])
            }
            None => schedule::eligible_staff(repos, place_id, &query.service_ids).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BookingStatus, CustomerInfo, DayHours, NewBooking, OpeningHours, Place, Service,
        TimeOffPeriod,
    };
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::{NaiveDateTime, Weekday};

    const MONDAY: (i32, u32, u32) = (2026, 3, 2);

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(MONDAY.0, MONDAY.1, MONDAY.2).unwrap()
    }

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn range(a: &str, b: &str) -> TimeRange {
        TimeRange::new(t(a), t(b)).unwrap()
    }

    fn at(time: &str) -> NaiveDateTime {
        crate::domain::calendar::instant_at(monday(), t(time))
    }

    /// Place 1 open 09:00-18:00 except Sunday, service 10 (30 min),
    /// service 11 (15 min), staff 1 does both, staff 2 only service 10.
    fn seeded() -> Arc<InMemoryRepositoryProvider> {
        let repos = InMemoryRepositoryProvider::new();
        let hours = OpeningHours::every_day(range("09:00", "18:00"))
            .with_day(Weekday::Sun, DayHours::Closed);
        repos.insert_place(Place::new(1, "Studio", hours));
        repos.insert_service(Service::new(10, 1, "Cut", 30, Decimal::new(2500, 2)));
        repos.insert_service(Service::new(11, 1, "Wash", 15, Decimal::new(800, 2)));
        repos.insert_staff(StaffMember::new(1, 1, "Ana", [10, 11]));
        repos.insert_staff(StaffMember::new(2, 1, "Ben", [10]));
        Arc::new(repos)
    }

    fn book(repos: &InMemoryRepositoryProvider, staff_id: i32, start: &str, minutes: u32) {
        repos.insert_booking_unchecked(NewBooking {
            place_id: 1,
            service_ids: vec![10],
            staff_id,
            date: monday(),
            start: t(start),
            duration_minutes: minutes,
            total_price: Decimal::ZERO,
            status: BookingStatus::Confirmed,
            customer: CustomerInfo {
                name: "Kim".into(),
                phone: "555".into(),
                email: None,
            },
            campaign_id: None,
        });
    }

    #[tokio::test]
    async fn empty_day_offers_every_fitting_start() {
        let repos = seeded();
        let service = AvailabilityService::new(repos);
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10]))
            .await
            .unwrap();

        assert_eq!(report.closed, None);
        assert_eq!(report.total_duration_minutes, 30);
        assert_eq!(report.slots.first().map(|s| s.start), Some(t("09:00")));
        assert_eq!(report.slots.last().map(|s| s.start), Some(t("17:30")));
        assert!(report.slots.iter().all(|s| s.available && s.free_staff_ids == vec![1, 2]));
    }

    #[tokio::test]
    async fn booking_blocks_every_overlapping_start() {
        let repos = seeded();
        book(&repos, 1, "10:00", 30);
        let service = AvailabilityService::new(repos);
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10]).with_staff(1))
            .await
            .unwrap();

        assert!(report.slot_at(t("09:30")).unwrap().available);
        assert!(!report.slot_at(t("09:45")).unwrap().available);
        assert!(!report.slot_at(t("10:00")).unwrap().available);
        assert!(!report.slot_at(t("10:15")).unwrap().available);
        assert!(report.slot_at(t("10:30")).unwrap().available);
    }

    #[tokio::test]
    async fn slot_stays_available_while_another_staff_is_free() {
        let repos = seeded();
        book(&repos, 1, "10:00", 30);
        let service = AvailabilityService::new(repos);
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10]))
            .await
            .unwrap();

        let slot = report.slot_at(t("10:00")).unwrap();
        assert!(slot.available);
        assert_eq!(slot.free_staff_ids, vec![2]);
        assert_eq!(slot.free_staff_count(), 1);
    }

    #[tokio::test]
    async fn combined_services_narrow_candidates_and_extend_duration() {
        let repos = seeded();
        let service = AvailabilityService::new(repos);
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10, 11]))
            .await
            .unwrap();

        assert_eq!(report.total_duration_minutes, 45);
        assert_eq!(report.total_price, Decimal::new(3300, 2));
        assert_eq!(report.slots.last().map(|s| s.start), Some(t("17:15")));
        assert!(report.slots.iter().all(|s| s.free_staff_ids == vec![1]));
    }

    #[tokio::test]
    async fn time_off_blocks_only_that_staff() {
        let repos = seeded();
        repos.insert_time_off(TimeOffPeriod::new(1, 2, at("12:00"), at("14:00")).unwrap());
        let service = AvailabilityService::new(repos);
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10]))
            .await
            .unwrap();

        assert_eq!(report.slot_at(t("11:30")).unwrap().free_staff_ids, vec![1, 2]);
        assert_eq!(report.slot_at(t("11:45")).unwrap().free_staff_ids, vec![1]);
        assert_eq!(report.slot_at(t("13:45")).unwrap().free_staff_ids, vec![1]);
        assert_eq!(report.slot_at(t("14:00")).unwrap().free_staff_ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn closed_day_and_disabled_booking_yield_no_slots() {
        let repos = seeded();
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        let service = AvailabilityService::new(repos.clone());
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, sunday, vec![10]))
            .await
            .unwrap();
        assert_eq!(report.closed, Some(ClosedReason::PlaceClosed));
        assert!(report.slots.is_empty());

        let mut place = Place::new(1, "Studio", OpeningHours::every_day(range("09:00", "18:00")));
        place.booking_enabled = false;
        repos.insert_place(place);
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10]))
            .await
            .unwrap();
        assert_eq!(report.closed, Some(ClosedReason::BookingDisabled));
        assert!(report.slots.is_empty());
    }

    #[tokio::test]
    async fn unknown_place_service_or_staff_is_reported() {
        let repos = seeded();
        repos.insert_service(Service::new(20, 2, "Elsewhere", 30, Decimal::ONE));
        let service = AvailabilityService::new(repos);

        let err = service
            .compute_availability(&AvailabilityQuery::new(9, monday(), vec![10]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Place", .. }));

        let err = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![20]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Service", .. }));

        let err = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![11]).with_staff(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::IneligibleStaff(2)));

        let err = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn campaigns_annotate_without_blocking() {
        let repos = seeded();
        repos.insert_campaign(
            CampaignWindow::new(7, 1, "Happy hour", at("15:00"), at("16:00"))
                .unwrap()
                .with_description("-20%"),
        );
        repos.insert_campaign(CampaignWindow::new(3, 1, "Spring", at("15:30"), at("17:00")).unwrap());
        let service = AvailabilityService::new(repos);
        let report = service
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10]))
            .await
            .unwrap();

        assert!(report.slot_at(t("14:45")).unwrap().campaigns.is_empty());
        let ids = |start: &str| -> Vec<i32> {
            report.slot_at(t(start)).unwrap().campaigns.iter().map(|c| c.id).collect()
        };
        assert_eq!(ids("15:00"), vec![7]);
        assert_eq!(ids("15:30"), vec![3, 7]);
        assert_eq!(ids("16:00"), vec![3]);
        assert_eq!(report.slot_at(t("15:30")).unwrap().primary_campaign().map(|c| c.id), Some(3));
        assert!(report.slots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn window_restricts_reported_starts() {
        let repos = seeded();
        let service = AvailabilityService::new(repos);
        let report = service
            .compute_availability_within(
                &AvailabilityQuery::new(1, monday(), vec![10]),
                range("12:00", "13:00"),
            )
            .await
            .unwrap();
        let starts: Vec<String> = report.slots.iter().map(|s| s.start.to_string()).collect();
        assert_eq!(starts, vec!["12:00", "12:15", "12:30", "12:45"]);
    }

    #[tokio::test]
    async fn repeated_queries_are_identical() {
        let repos = seeded();
        book(&repos, 2, "11:00", 30);
        let service = AvailabilityService::new(repos);
        let query = AvailabilityQuery::new(1, monday(), vec![10]);
        let first = service.compute_availability(&query).await.unwrap();
        let second = service.compute_availability(&query).await.unwrap();
        assert_eq!(first, second);
    }
}
