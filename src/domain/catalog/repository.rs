//! Service catalog interface

use async_trait::async_trait;

use super::model::Service;
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// All services owned by a place, active or not, ordered by id
    async fn find_for_place(&self, place_id: i32) -> DomainResult<Vec<Service>>;

    /// Services with the given ids, in any place. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Service>>;
}
