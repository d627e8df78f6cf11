//! Compatibility DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Service, StaffMember};

#[derive(Debug, Deserialize, IntoParams)]
pub struct EligibleStaffParams {
    /// Comma separated service ids; omitted means every active staff member
    pub service_ids: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffDto {
    pub id: i32,
    pub place_id: i32,
    pub name: String,
    pub service_ids: Vec<i32>,
}

impl From<StaffMember> for StaffDto {
    fn from(s: StaffMember) -> Self {
        Self {
            id: s.id,
            place_id: s.place_id,
            name: s.name,
            service_ids: s.service_ids.into_iter().collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceDto {
    pub id: i32,
    pub place_id: i32,
    pub name: String,
    pub duration_minutes: u32,
    pub price: String,
}

impl From<Service> for ServiceDto {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            place_id: s.place_id,
            name: s.name,
            duration_minutes: s.duration_minutes,
            price: s.price.to_string(),
        }
    }
}
