//! Booking domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::calendar::{TimeOfDay, TimeRange};
use crate::shared::errors::DomainError;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, waiting for the place to confirm
    Pending,
    /// Accepted by the place
    Confirmed,
    /// Cancelled by customer or place; frees the interval
    Cancelled,
    /// Service was delivered
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Whether a booking in this status occupies its interval
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Pending, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
        )
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::InvalidRequest(format!(
                "unknown booking status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who to book with. `AnyAvailable` is resolved to a concrete staff member
/// inside the commit and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffSelector {
    Explicit(i32),
    AnyAvailable,
}

impl From<Option<i32>> for StaffSelector {
    fn from(staff_id: Option<i32>) -> Self {
        staff_id.map_or(StaffSelector::AnyAvailable, StaffSelector::Explicit)
    }
}

/// Customer contact fields captured with the booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// A booking ready to be written to the ledger. Staff is always concrete.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub place_id: i32,
    pub service_ids: Vec<i32>,
    pub staff_id: i32,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub duration_minutes: u32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub customer: CustomerInfo,
    pub campaign_id: Option<i32>,
}

impl NewBooking {
    pub fn interval(&self) -> Option<TimeRange> {
        TimeRange::starting_at(self.start, self.duration_minutes)
    }

    pub fn into_booking(self, id: i64, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            place_id: self.place_id,
            service_ids: self.service_ids,
            staff_id: self.staff_id,
            date: self.date,
            start: self.start,
            duration_minutes: self.duration_minutes,
            total_price: self.total_price,
            status: self.status,
            customer: self.customer,
            campaign_id: self.campaign_id,
            created_at,
        }
    }
}

/// Reservation record in the ledger
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i64,
    pub place_id: i32,
    /// Services performed back to back, in request order
    pub service_ids: Vec<i32>,
    pub staff_id: i32,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    /// Sum of the constituent service durations
    pub duration_minutes: u32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub customer: CustomerInfo,
    /// Campaign active at the start instant when the booking was made
    pub campaign_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn interval(&self) -> Option<TimeRange> {
        TimeRange::starting_at(self.start, self.duration_minutes)
    }

    /// Whether this booking takes up any part of `range`
    pub fn occupies(&self, range: &TimeRange) -> bool {
        self.status.blocks_slot()
            && self
                .interval()
                .is_some_and(|interval| interval.overlaps(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking(start: &str, minutes: u32) -> Booking {
        NewBooking {
            place_id: 1,
            service_ids: vec![10],
            staff_id: 5,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            start: start.parse().unwrap(),
            duration_minutes: minutes,
            total_price: Decimal::new(2500, 2),
            status: BookingStatus::Confirmed,
            customer: CustomerInfo {
                name: "Dana".into(),
                phone: "+100000000".into(),
                email: None,
            },
            campaign_id: None,
        }
        .into_booking(1, Utc::now())
    }

    fn range(a: &str, b: &str) -> TimeRange {
        TimeRange::new(a.parse().unwrap(), b.parse().unwrap()).unwrap()
    }

    #[test]
    fn occupies_full_duration() {
        let b = sample_booking("10:00", 30);
        assert!(b.occupies(&range("09:45", "10:15")));
        assert!(b.occupies(&range("10:15", "10:30")));
        assert!(!b.occupies(&range("10:30", "11:00")));
        assert!(!b.occupies(&range("09:30", "10:00")));
    }

    #[test]
    fn cancelled_booking_occupies_nothing() {
        let mut b = sample_booking("10:00", 30);
        b.status = BookingStatus::Cancelled;
        assert!(!b.occupies(&range("10:00", "10:30")));
    }

    #[test]
    fn status_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn status_parse_rejects_unknown() {
        assert_eq!("confirmed".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
        assert!("Accepted".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn selector_from_optional_id() {
        assert_eq!(StaffSelector::from(Some(3)), StaffSelector::Explicit(3));
        assert_eq!(StaffSelector::from(None), StaffSelector::AnyAvailable);
    }
}
