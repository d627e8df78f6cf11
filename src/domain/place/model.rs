//! Place domain entity

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::calendar::TimeRange;

pub const DEFAULT_SLOT_GRANULARITY_MINUTES: u16 = 15;

/// Opening hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHours {
    Closed,
    Open(TimeRange),
}

impl DayHours {
    pub fn is_open(&self) -> bool {
        matches!(self, DayHours::Open(_))
    }

    pub fn range(&self) -> Option<TimeRange> {
        match self {
            DayHours::Open(range) => Some(*range),
            DayHours::Closed => None,
        }
    }
}

/// Weekly opening-hours table, one entry per weekday starting Monday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHours {
    days: [DayHours; 7],
}

impl OpeningHours {
    pub fn new(days: [DayHours; 7]) -> Self {
        Self { days }
    }

    pub fn closed() -> Self {
        Self::new([DayHours::Closed; 7])
    }

    /// Same hours every day of the week.
    pub fn every_day(range: TimeRange) -> Self {
        Self::new([DayHours::Open(range); 7])
    }

    pub fn with_day(mut self, weekday: Weekday, hours: DayHours) -> Self {
        self.days[weekday.num_days_from_monday() as usize] = hours;
        self
    }

    pub fn for_weekday(&self, weekday: Weekday) -> DayHours {
        self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn for_date(&self, date: NaiveDate) -> DayHours {
        self.for_weekday(date.weekday())
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, DayHours)> + '_ {
        self.days.iter().scan(Weekday::Sun, |weekday, hours| {
            *weekday = weekday.succ();
            Some((*weekday, *hours))
        })
    }
}

/// A service-business location
#[derive(Debug, Clone)]
pub struct Place {
    pub id: i32,
    pub name: String,
    pub opening_hours: OpeningHours,
    /// Whether customers can book online at all
    pub booking_enabled: bool,
    /// Places are soft-deactivated, never hard-deleted
    pub is_active: bool,
    /// Spacing of candidate start times, in minutes
    pub slot_granularity_minutes: u16,
}

impl Place {
    pub fn new(id: i32, name: impl Into<String>, opening_hours: OpeningHours) -> Self {
        Self {
            id,
            name: name.into(),
            opening_hours,
            booking_enabled: true,
            is_active: true,
            slot_granularity_minutes: DEFAULT_SLOT_GRANULARITY_MINUTES,
        }
    }

    pub fn with_granularity(mut self, minutes: u16) -> Self {
        self.slot_granularity_minutes = minutes;
        self
    }

    pub fn hours_on(&self, date: NaiveDate) -> DayHours {
        self.opening_hours.for_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(a: &str, b: &str) -> TimeRange {
        TimeRange::new(a.parse().unwrap(), b.parse().unwrap()).unwrap()
    }

    #[test]
    fn weekday_lookup_follows_calendar() {
        let hours = OpeningHours::every_day(range("09:00", "18:00"))
            .with_day(Weekday::Sun, DayHours::Closed);
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();

        assert_eq!(hours.for_date(monday).range(), Some(range("09:00", "18:00")));
        assert!(!hours.for_date(sunday).is_open());
    }

    #[test]
    fn days_lists_all_seven_weekdays() {
        let hours = OpeningHours::closed().with_day(Weekday::Wed, DayHours::Open(range("10:00", "14:00")));
        let days: Vec<_> = hours.days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].0, Weekday::Mon);
        assert!(days[2].1.is_open());
        assert_eq!(days.iter().filter(|(_, h)| h.is_open()).count(), 1);
    }

    #[test]
    fn new_place_defaults() {
        let place = Place::new(1, "Studio", OpeningHours::closed());
        assert!(place.booking_enabled);
        assert!(place.is_active);
        assert_eq!(place.slot_granularity_minutes, DEFAULT_SLOT_GRANULARITY_MINUTES);
    }
}
