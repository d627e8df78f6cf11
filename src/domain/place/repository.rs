//! Place repository interface

use async_trait::async_trait;

use super::model::Place;
use crate::domain::DomainResult;

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Find a place with its opening-hours table. Deactivated places are
    /// returned too; callers decide how to treat them.
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Place>>;
}
