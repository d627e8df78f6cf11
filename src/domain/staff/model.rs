//! Staff member domain entity

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    pub id: i32,
    pub place_id: i32,
    pub name: String,
    pub is_active: bool,
    /// Services this person is able to perform
    pub service_ids: BTreeSet<i32>,
}

impl StaffMember {
    pub fn new(
        id: i32,
        place_id: i32,
        name: impl Into<String>,
        service_ids: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            id,
            place_id,
            name: name.into(),
            is_active: true,
            service_ids: service_ids.into_iter().collect(),
        }
    }

    pub fn can_perform(&self, service_id: i32) -> bool {
        self.service_ids.contains(&service_id)
    }

    /// One person performs every service of a booking, so eligibility
    /// means being able to do all of them.
    pub fn can_perform_all(&self, service_ids: &[i32]) -> bool {
        self.is_active && service_ids.iter().all(|id| self.can_perform(*id))
    }
}
