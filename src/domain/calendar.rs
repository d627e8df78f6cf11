//! Calendar primitives
//!
//! Minute-granularity wall-clock math in place-local time. Nothing here
//! knows about timezones: the caller hands in the "local day" being queried.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::errors::DomainError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since local midnight.
///
/// `0..=1439` are ordinary times of day. `1440` ([`TimeOfDay::END_OF_DAY`])
/// is only valid as the exclusive end of an interval, e.g. a place that
/// stays open until midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(TimeOfDay(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour.checked_mul(60)?.checked_add(minute)?)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Adds minutes without wrapping past midnight. Returns `None` when the
    /// result would pass [`TimeOfDay::END_OF_DAY`].
    pub fn add_minutes(self, n: u32) -> Option<Self> {
        let total = u32::from(self.0).checked_add(n)?;
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }

    /// Minutes elapsed from `earlier` to `self`, if `self` is not before it.
    pub fn minutes_since(self, earlier: TimeOfDay) -> Option<u16> {
        self.0.checked_sub(earlier.0)
    }

    /// `None` for [`TimeOfDay::END_OF_DAY`], which has no `NaiveTime` form.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        // Seconds are truncated; the engine works at minute granularity.
        TimeOfDay((t.hour() * 60 + t.minute()) as u16)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidRequest(format!("invalid time of day '{}'", s));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Half-open interval `[start, end)` within one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeRange {
    /// Zero-length and inverted ranges are rejected.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidRequest(format!(
                "empty or inverted interval {}-{}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Range starting at `start` lasting `minutes`, or `None` if it would
    /// be empty or run past midnight.
    pub fn starting_at(start: TimeOfDay, minutes: u32) -> Option<Self> {
        if minutes == 0 {
            return None;
        }
        let end = start.add_minutes(minutes)?;
        Some(Self { start, end })
    }

    pub fn whole_day() -> Self {
        Self {
            start: TimeOfDay::MIDNIGHT,
            end: TimeOfDay::END_OF_DAY,
        }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.0 - self.start.0
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        overlaps(self, other)
    }

    pub fn contains(&self, inner: &TimeRange) -> bool {
        contains(self, inner)
    }

    pub fn contains_time(&self, t: TimeOfDay) -> bool {
        self.start <= t && t < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

pub fn overlaps(a: &TimeRange, b: &TimeRange) -> bool {
    a.start < b.end && b.start < a.end
}

pub fn contains(outer: &TimeRange, inner: &TimeRange) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// The place-local instant formed by a date and a time of day.
pub fn instant_at(date: NaiveDate, time: TimeOfDay) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(time.minutes()))
}

/// `[start of date, start of next day)` as instants.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = instant_at(date, TimeOfDay::MIDNIGHT);
    (start, start + Duration::days(1))
}

/// Clip an instant range to `date` and express it as a [`TimeRange`].
/// Returns `None` when the range does not touch that day.
pub fn day_range_of(
    date: NaiveDate,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Option<TimeRange> {
    let (day_start, day_end) = day_bounds(date);
    let start = from.max(day_start);
    let end = to.min(day_end);
    if start >= end {
        return None;
    }
    let to_tod = |instant: NaiveDateTime| {
        let minutes = (instant - day_start).num_minutes();
        TimeOfDay::from_minutes(minutes as u16)
    };
    let start = to_tod(start)?;
    // Round a partial trailing minute up so the block is never shortened.
    let end_minutes = (end - day_start).num_seconds();
    let end = TimeOfDay::from_minutes(((end_minutes + 59) / 60) as u16)?;
    TimeRange::new(start, end).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn range(a: &str, b: &str) -> TimeRange {
        TimeRange::new(t(a), t(b)).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(t("09:05").minutes(), 545);
        assert_eq!(t("24:00"), TimeOfDay::END_OF_DAY);
        assert_eq!(t("7:30").to_string(), "07:30");
        assert!("24:01".parse::<TimeOfDay>().is_err());
        assert!("10:60".parse::<TimeOfDay>().is_err());
        assert!("10:5".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn add_minutes_never_wraps() {
        assert_eq!(t("23:30").add_minutes(30), Some(TimeOfDay::END_OF_DAY));
        assert_eq!(t("23:30").add_minutes(31), None);
        assert_eq!(t("10:00").add_minutes(45), Some(t("10:45")));
    }

    #[test]
    fn half_open_overlap() {
        assert!(range("10:00", "10:30").overlaps(&range("10:15", "10:45")));
        assert!(!range("10:00", "10:30").overlaps(&range("10:30", "11:00")));
        assert!(!range("10:30", "11:00").overlaps(&range("10:00", "10:30")));
        assert!(range("09:00", "18:00").overlaps(&range("12:00", "12:15")));
    }

    #[test]
    fn containment() {
        let day = range("09:00", "18:00");
        assert!(day.contains(&range("17:30", "18:00")));
        assert!(!day.contains(&range("17:45", "18:15")));
        assert!(!day.contains(&range("08:45", "09:15")));
        assert!(day.contains_time(t("09:00")));
        assert!(!day.contains_time(t("18:00")));
    }

    #[test]
    fn zero_length_interval_rejected() {
        assert!(TimeRange::new(t("10:00"), t("10:00")).is_err());
        assert!(TimeRange::new(t("11:00"), t("10:00")).is_err());
        assert!(TimeRange::starting_at(t("10:00"), 0).is_none());
    }

    #[test]
    fn day_range_clips_multi_day_block() {
        let from = date().and_hms_opt(13, 0, 0).unwrap();
        let to = date().succ_opt().unwrap().and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(
            day_range_of(date(), from, to),
            Some(range("13:00", "24:00"))
        );
        assert_eq!(
            day_range_of(date().succ_opt().unwrap(), from, to),
            Some(range("00:00", "09:00"))
        );
        assert_eq!(day_range_of(date().pred_opt().unwrap(), from, to), None);
    }

    #[test]
    fn instant_at_builds_local_datetime() {
        assert_eq!(
            instant_at(date(), t("12:15")),
            date().and_hms_opt(12, 15, 0).unwrap()
        );
        assert_eq!(
            instant_at(date(), TimeOfDay::END_OF_DAY),
            date().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
    }
}
