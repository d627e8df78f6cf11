//! Time-off repository interface

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::model::TimeOffPeriod;
use crate::domain::DomainResult;

#[async_trait]
pub trait TimeOffRepository: Send + Sync {
    /// Periods of `staff_id` that intersect `[from, to)`
    async fn find_overlapping(
        &self,
        staff_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> DomainResult<Vec<TimeOffPeriod>>;
}
