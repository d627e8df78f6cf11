//! Parsing of path and query values that arrive as plain strings

use chrono::NaiveDate;

use crate::domain::calendar::{TimeOfDay, TimeRange};
use crate::shared::errors::DomainError;

pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidRequest(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}

pub fn parse_time(raw: &str) -> Result<TimeOfDay, DomainError> {
    raw.trim().parse()
}

/// Comma separated ids, e.g. `1,2,3`. Blank input yields an empty list.
pub fn parse_id_list(raw: &str) -> Result<Vec<i32>, DomainError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| DomainError::InvalidRequest(format!("invalid id '{}'", part)))
        })
        .collect()
}

/// Optional `from`/`to` pair. A missing bound falls back to the start or
/// end of the day.
pub fn parse_window(from: Option<&str>, to: Option<&str>) -> Result<Option<TimeRange>, DomainError> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let day = TimeRange::whole_day();
    let start = from.map(parse_time).transpose()?.unwrap_or(day.start());
    let end = to.map(parse_time).transpose()?.unwrap_or(day.end());
    TimeRange::new(start, end).map(Some)
}
