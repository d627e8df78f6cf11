//! Staff registry interface

use async_trait::async_trait;

use super::model::StaffMember;
use crate::domain::DomainResult;

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<StaffMember>>;

    /// All staff of a place with their eligibility sets, ordered by id
    async fn find_for_place(&self, place_id: i32) -> DomainResult<Vec<StaffMember>>;
}
