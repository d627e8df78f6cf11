//! Time-off domain entity

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::calendar::{day_range_of, TimeRange};
use crate::shared::errors::DomainError;

/// A block during which a staff member cannot be booked, layered on top
/// of opening hours. Bounds are place-local instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOffPeriod {
    pub id: i32,
    pub staff_id: i32,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

impl TimeOffPeriod {
    pub fn new(
        id: i32,
        staff_id: i32,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        if starts_at >= ends_at {
            return Err(DomainError::InvalidRequest(format!(
                "time-off must end after it starts ({} >= {})",
                starts_at, ends_at
            )));
        }
        Ok(Self {
            id,
            staff_id,
            starts_at,
            ends_at,
        })
    }

    /// The part of this period that falls on `date`, if any
    pub fn range_on(&self, date: NaiveDate) -> Option<TimeRange> {
        day_range_of(date, self.starts_at, self.ends_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn rejects_inverted_period() {
        assert!(TimeOffPeriod::new(1, 1, at(2, 14), at(2, 13)).is_err());
        assert!(TimeOffPeriod::new(1, 1, at(2, 13), at(2, 13)).is_err());
    }

    #[test]
    fn range_on_date() {
        let period = TimeOffPeriod::new(1, 1, at(2, 13), at(2, 14)).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let range = period.range_on(date).unwrap();
        assert_eq!(range.to_string(), "13:00-14:00");
        assert!(period.range_on(date.succ_opt().unwrap()).is_none());
    }
}
