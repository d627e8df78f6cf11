//! Booking transaction manager
//!
//! Commits are the only writers of the ledger. Every constraint is
//! re-derived from stored data at commit time, then the final
//! conflict check and insert run while the staff-day locks are held and
//! inside the ledger's own atomic insert.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, warn};

use super::locks::StaffDayLocks;
use crate::application::schedule::{self, StaffDay};
use crate::domain::calendar::{TimeOfDay, TimeRange};
use crate::domain::catalog::{total_duration_minutes, total_price};
use crate::domain::{
    Booking, BookingStatus, CustomerInfo, DomainError, DomainResult, NewBooking, Place,
    RepositoryProvider, StaffSelector,
};

/// Booking request as received from a customer
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub place_id: i32,
    pub service_ids: Vec<i32>,
    pub staff: StaffSelector,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub customer: CustomerInfo,
    /// Campaign the customer picked; must be active at the start instant
    pub campaign_id: Option<i32>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    locks: StaffDayLocks,
    initial_status: BookingStatus,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, initial_status: BookingStatus) -> Self {
        Self {
            repos,
            locks: StaffDayLocks::new(),
            initial_status,
        }
    }

    /// Validate and atomically record a booking.
    ///
    /// Rejections are expected outcomes: they are counted per error code
    /// and logged at `info`; only storage failures log at `error`.
    pub async fn commit_booking(&self, request: BookingRequest) -> DomainResult<Booking> {
        let place_id = request.place_id;
        let date = request.date;
        let start = request.start;

        let result = self.try_commit(request).await;
        self.locks.prune_idle();

        match &result {
            Ok(booking) => {
                metrics::counter!("bookings_committed_total").increment(1);
                info!(
                    booking_id = booking.id,
                    place_id,
                    staff_id = booking.staff_id,
                    date = %date,
                    start = %start,
                    duration = booking.duration_minutes,
                    "Booking committed"
                );
            }
            Err(e) if e.is_expected() => {
                metrics::counter!("booking_rejections_total", "code" => e.code()).increment(1);
                info!(place_id, date = %date, start = %start, code = e.code(), "Booking rejected: {}", e);
            }
            Err(e) => {
                metrics::counter!("booking_rejections_total", "code" => e.code()).increment(1);
                error!(place_id, date = %date, start = %start, "Booking commit failed: {}", e);
            }
        }
        result
    }

    async fn try_commit(&self, request: BookingRequest) -> DomainResult<Booking> {
        let repos = self.repos.as_ref();
        validate_request(&request)?;

        let place = schedule::resolve_place(repos, request.place_id).await?;
        let opening = opening_for(&place, request.date, request.start)?;

        let services = schedule::resolve_services(
            repos,
            &place,
            &request.service_ids,
            DomainError::ServiceUnknownOrInactive,
        )
        .await?;
        let duration = total_duration_minutes(&services);

        let offset = request.start.minutes() - opening.start().minutes();
        if offset % place.slot_granularity_minutes.max(1) != 0 {
            return Err(DomainError::InvalidRequest(format!(
                "start {} is not on the {}-minute grid from {}",
                request.start,
                place.slot_granularity_minutes,
                opening.start()
            )));
        }

        let interval = TimeRange::starting_at(request.start, duration).ok_or_else(|| {
            DomainError::InvalidDuration(format!(
                "{} minutes from {} runs past midnight",
                duration, request.start
            ))
        })?;
        if !opening.contains(&interval) {
            return Err(DomainError::InvalidDuration(format!(
                "{} ends after closing time {}",
                interval,
                opening.end()
            )));
        }

        let candidates = self.candidate_ids(&request, place.id).await?;

        let _guard = self.locks.acquire(&candidates, request.date).await;

        let staff_id = self
            .first_free_staff(&candidates, request.date, &interval, request.start)
            .await?;
        let campaign_id = self
            .resolve_campaign(place.id, request.date, request.start, request.campaign_id)
            .await?;

        let booking = NewBooking {
            place_id: place.id,
            service_ids: request.service_ids,
            staff_id,
            date: request.date,
            start: request.start,
            duration_minutes: duration,
            total_price: total_price(&services),
            status: self.initial_status,
            customer: request.customer,
            campaign_id,
        };
        repos.bookings().insert_exclusive(booking).await
    }

    /// Staff ids the booking may land on, ascending
    async fn candidate_ids(&self, request: &BookingRequest, place_id: i32) -> DomainResult<Vec<i32>> {
        let repos = self.repos.as_ref();
        match request.staff {
            StaffSelector::Explicit(staff_id) => {
                let staff = repos
                    .staff()
                    .find_by_id(staff_id)
                    .await?
                    .filter(|s| s.place_id == place_id)
                    .ok_or_else(|| DomainError::not_found("Staff", staff_id))?;
                if !staff.can_perform_all(&request.service_ids) {
                    return Err(DomainError::IneligibleStaff(staff_id));
                }
                Ok(vec![staff_id])
            }
            StaffSelector::AnyAvailable => {
                let eligible =
                    schedule::eligible_staff(repos, place_id, &request.service_ids).await?;
                if eligible.is_empty() {
                    return Err(DomainError::NoEligibleStaff);
                }
                Ok(eligible.into_iter().map(|s| s.id).collect())
            }
        }
    }

    /// First candidate free for the whole interval. Must run under the
    /// candidates' locks.
    async fn first_free_staff(
        &self,
        candidates: &[i32],
        date: NaiveDate,
        interval: &TimeRange,
        start: TimeOfDay,
    ) -> DomainResult<i32> {
        let mut booked = None;
        let mut away = None;
        for &staff_id in candidates {
            let day = StaffDay::load(self.repos.as_ref(), staff_id, date).await?;
            if day.time_off_conflict(interval) {
                away.get_or_insert(staff_id);
            } else if day.booking_conflict(interval) {
                booked.get_or_insert(staff_id);
            } else {
                return Ok(staff_id);
            }
        }
        match (booked, away) {
            (Some(staff_id), _) => Err(DomainError::SlotConflict {
                staff_id,
                date,
                start,
            }),
            (None, Some(staff_id)) => Err(DomainError::StaffUnavailable(staff_id)),
            (None, None) => Err(DomainError::NoEligibleStaff),
        }
    }

    async fn resolve_campaign(
        &self,
        place_id: i32,
        date: NaiveDate,
        start: TimeOfDay,
        requested: Option<i32>,
    ) -> DomainResult<Option<i32>> {
        let active = schedule::load_campaigns_at(self.repos.as_ref(), place_id, date, start).await?;
        match requested {
            Some(id) if active.iter().any(|c| c.id == id) => Ok(Some(id)),
            Some(id) => Err(DomainError::InvalidRequest(format!(
                "campaign {} is not active at {} {}",
                id, date, start
            ))),
            None => Ok(active.first().map(|c| c.id)),
        }
    }

    /// Move a booking along its lifecycle. Setting the current status
    /// again is a no-op.
    pub async fn update_status(&self, booking_id: i64, status: BookingStatus) -> DomainResult<Booking> {
        let ledger = self.repos.bookings();
        let mut booking = ledger
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;

        if booking.status == status {
            return Ok(booking);
        }
        if !booking.status.can_transition_to(status) {
            warn!(
                booking_id,
                from = %booking.status,
                to = %status,
                "Rejected booking status change"
            );
            return Err(DomainError::InvalidTransition {
                from: booking.status,
                to: status,
            });
        }

        if !ledger.update_status(booking_id, booking.status, status).await? {
            // Another writer moved the booking first
            let current = ledger
                .find_by_id(booking_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;
            if current.status == status {
                return Ok(current);
            }
            warn!(
                booking_id,
                from = %current.status,
                to = %status,
                "Rejected booking status change after concurrent update"
            );
            return Err(DomainError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }
        info!(booking_id, from = %booking.status, to = %status, "Booking status changed");
        booking.status = status;
        Ok(booking)
    }

    pub async fn cancel(&self, booking_id: i64) -> DomainResult<Booking> {
        self.update_status(booking_id, BookingStatus::Cancelled).await
    }

    pub async fn find_booking(&self, booking_id: i64) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))
    }

    /// Every booking of a place on a date, cancelled ones included
    pub async fn bookings_on(&self, place_id: i32, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let place = schedule::resolve_place(self.repos.as_ref(), place_id).await?;
        self.repos.bookings().find_for_place_on(place.id, date).await
    }
}

fn validate_request(request: &BookingRequest) -> DomainResult<()> {
    if request.service_ids.is_empty() {
        return Err(DomainError::InvalidRequest(
            "at least one service is required".into(),
        ));
    }
    if request.customer.name.trim().is_empty() {
        return Err(DomainError::InvalidRequest("customer name is required".into()));
    }
    if request.customer.phone.trim().is_empty() {
        return Err(DomainError::InvalidRequest("customer phone is required".into()));
    }
    Ok(())
}

/// Opening range of the date, provided the place takes bookings then and
/// `start` falls inside it
fn opening_for(place: &Place, date: NaiveDate, start: TimeOfDay) -> DomainResult<TimeRange> {
    let closed = || DomainError::PlaceClosed {
        place_id: place.id,
        date,
    };
    if !place.booking_enabled {
        return Err(closed());
    }
    let opening = place.hours_on(date).range().ok_or_else(closed)?;
    if !opening.contains_time(start) {
        return Err(closed());
    }
    Ok(opening)
}
