//! Constraint loading shared by the availability calculator and the
//! booking transaction manager.
//!
//! Both paths resolve the same place, services, staff and per-day
//! blocks, but each does so independently: nothing computed for an
//! availability read is trusted at commit time.

use chrono::{Duration, NaiveDate};

use crate::domain::calendar::{day_bounds, instant_at, TimeOfDay, TimeRange};
use crate::domain::{
    Booking, CampaignWindow, DomainError, DomainResult, Place, RepositoryProvider, Service,
    StaffMember,
};

/// Active place or `NotFound`.
pub(crate) async fn resolve_place(
    repos: &dyn RepositoryProvider,
    place_id: i32,
) -> DomainResult<Place> {
    repos
        .places()
        .find_by_id(place_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| DomainError::not_found("Place", place_id))
}

/// Resolve requested services in request order. Any id that is unknown,
/// inactive or owned by another place is reported through `missing`.
pub(crate) async fn resolve_services(
    repos: &dyn RepositoryProvider,
    place: &Place,
    service_ids: &[i32],
    missing: impl Fn(i32) -> DomainError,
) -> DomainResult<Vec<Service>> {
    let found = repos.services().find_by_ids(service_ids).await?;
    service_ids
        .iter()
        .map(|id| {
            found
                .iter()
                .find(|s| s.id == *id && s.is_bookable_at(place.id))
                .cloned()
                .ok_or_else(|| missing(*id))
        })
        .collect()
}

/// Active staff of a place able to perform every requested service,
/// ordered by id.
pub(crate) async fn eligible_staff(
    repos: &dyn RepositoryProvider,
    place_id: i32,
    service_ids: &[i32],
) -> DomainResult<Vec<StaffMember>> {
    let mut staff: Vec<StaffMember> = repos
        .staff()
        .find_for_place(place_id)
        .await?
        .into_iter()
        .filter(|s| s.can_perform_all(service_ids))
        .collect();
    staff.sort_by_key(|s| s.id);
    Ok(staff)
}

/// Everything that blocks one staff member on one date.
#[derive(Debug, Clone)]
pub(crate) struct StaffDay {
    pub staff_id: i32,
    time_off: Vec<TimeRange>,
    bookings: Vec<Booking>,
}

impl StaffDay {
    pub async fn load(
        repos: &dyn RepositoryProvider,
        staff_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Self> {
        let (from, to) = day_bounds(date);
        let time_off = repos
            .time_off()
            .find_overlapping(staff_id, from, to)
            .await?
            .iter()
            .filter_map(|p| p.range_on(date))
            .collect();
        let bookings = repos
            .bookings()
            .find_active_for_staff_on(staff_id, date)
            .await?;
        Ok(Self {
            staff_id,
            time_off,
            bookings,
        })
    }

    pub fn time_off_conflict(&self, range: &TimeRange) -> bool {
        self.time_off.iter().any(|block| block.overlaps(range))
    }

    pub fn booking_conflict(&self, range: &TimeRange) -> bool {
        self.bookings.iter().any(|b| b.occupies(range))
    }

    pub fn is_free(&self, range: &TimeRange) -> bool {
        !self.time_off_conflict(range) && !self.booking_conflict(range)
    }
}

/// Campaigns of a place whose window contains `(date, start)`, ordered by id.
pub(crate) fn campaigns_at(
    campaigns: &[CampaignWindow],
    date: NaiveDate,
    start: TimeOfDay,
) -> Vec<CampaignWindow> {
    let instant = instant_at(date, start);
    let mut covering: Vec<CampaignWindow> = campaigns
        .iter()
        .filter(|c| c.covers(instant))
        .cloned()
        .collect();
    covering.sort_by_key(|c| c.id);
    covering
}

/// Load campaigns touching the minute that starts at `(date, start)`.
pub(crate) async fn load_campaigns_at(
    repos: &dyn RepositoryProvider,
    place_id: i32,
    date: NaiveDate,
    start: TimeOfDay,
) -> DomainResult<Vec<CampaignWindow>> {
    let instant = instant_at(date, start);
    let candidates = repos
        .campaigns()
        .find_active(place_id, instant, instant + Duration::minutes(1))
        .await?;
    Ok(campaigns_at(&candidates, date, start))
}
