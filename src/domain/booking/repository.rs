//! Booking ledger interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, BookingStatus, NewBooking};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingLedger: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>>;

    /// Non-cancelled bookings of a staff member on a date
    async fn find_active_for_staff_on(
        &self,
        staff_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>>;

    /// Every booking of a place on a date, any status, ordered by staff then start
    async fn find_for_place_on(&self, place_id: i32, date: NaiveDate)
        -> DomainResult<Vec<Booking>>;

    /// Insert a booking unless it overlaps a non-cancelled booking of the
    /// same staff member on the same date. The check and the insert form
    /// one atomic step; an overlap yields `DomainError::SlotConflict`.
    async fn insert_exclusive(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Set the status to `to` only if it is still `from`. Returns `false`
    /// when the stored status has moved on; transition rules are enforced
    /// by the caller.
    async fn update_status(&self, id: i64, from: BookingStatus, to: BookingStatus)
        -> DomainResult<bool>;
}
