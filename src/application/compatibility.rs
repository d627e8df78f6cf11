//! Staff and service compatibility lookups
//!
//! Used to filter pickers in booking UIs. Advisory only: commits never
//! consult these answers.

use std::sync::Arc;

use crate::application::schedule;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Service, StaffMember};

pub struct CompatibilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CompatibilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Active staff of the place able to perform every listed service.
    /// An empty list matches all active staff.
    pub async fn staff_eligible_for(
        &self,
        place_id: i32,
        service_ids: &[i32],
    ) -> DomainResult<Vec<StaffMember>> {
        let place = schedule::resolve_place(self.repos.as_ref(), place_id).await?;
        schedule::eligible_staff(self.repos.as_ref(), place.id, service_ids).await
    }

    /// Active services of the staff member's place that they can perform
    pub async fn services_performable_by(&self, staff_id: i32) -> DomainResult<Vec<Service>> {
        let staff = self
            .repos
            .staff()
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Staff", staff_id))?;

        let services = self.repos.services().find_for_place(staff.place_id).await?;
        Ok(services
            .into_iter()
            .filter(|s| s.is_active && staff.can_perform(s.id))
            .collect())
    }
}
