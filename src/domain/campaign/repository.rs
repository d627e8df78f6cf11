//! Campaign registry interface

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::model::CampaignWindow;
use crate::domain::DomainResult;

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Campaigns of a place whose window intersects `[from, to)`, ordered by id
    async fn find_active(
        &self,
        place_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> DomainResult<Vec<CampaignWindow>>;
}
