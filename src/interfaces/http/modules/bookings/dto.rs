//! Booking DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::BookingRequest;
use crate::domain::{Booking, CustomerInfo, DomainError, StaffSelector};
use crate::interfaces::http::common::params::{parse_date, parse_time};

/// Who should perform the booking
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StaffChoice {
    Explicit {
        staff_id: i32,
    },
    /// Lowest-id eligible staff member free for the whole interval
    #[default]
    AnyAvailable,
}

impl From<StaffChoice> for StaffSelector {
    fn from(choice: StaffChoice) -> Self {
        match choice {
            StaffChoice::Explicit { staff_id } => StaffSelector::Explicit(staff_id),
            StaffChoice::AnyAvailable => StaffSelector::AnyAvailable,
        }
    }
}

/// Request to book one or more services
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub place_id: i32,
    /// Performed in this order, back to back
    #[validate(length(min = 1, max = 20))]
    pub service_ids: Vec<i32>,
    #[serde(default)]
    pub staff: StaffChoice,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, must be on the slot grid
    pub start: String,
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    #[validate(length(min = 3, max = 32))]
    pub customer_phone: String,
    #[validate(email)]
    pub customer_email: Option<String>,
    /// Campaign to attach; defaults to the lowest-id campaign covering the start
    pub campaign_id: Option<i32>,
}

impl CreateBookingRequest {
    pub fn into_domain(self) -> Result<BookingRequest, DomainError> {
        Ok(BookingRequest {
            place_id: self.place_id,
            service_ids: self.service_ids,
            staff: self.staff.into(),
            date: parse_date(&self.date)?,
            start: parse_time(&self.start)?,
            customer: CustomerInfo {
                name: self.customer_name,
                phone: self.customer_phone,
                email: self.customer_email,
            },
            campaign_id: self.campaign_id,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// `pending`, `confirmed`, `cancelled` or `completed`
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingsOnParams {
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: i64,
    pub place_id: i32,
    pub service_ids: Vec<i32>,
    pub staff_id: i32,
    pub date: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
    pub total_price: String,
    pub status: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub campaign_id: Option<i32>,
    pub created_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        let end = b.interval().map(|r| r.end().to_string()).unwrap_or_default();
        Self {
            id: b.id,
            place_id: b.place_id,
            service_ids: b.service_ids,
            staff_id: b.staff_id,
            date: b.date.to_string(),
            start: b.start.to_string(),
            end,
            duration_minutes: b.duration_minutes,
            total_price: b.total_price.to_string(),
            status: b.status.to_string(),
            customer_name: b.customer.name,
            customer_phone: b.customer.phone,
            customer_email: b.customer.email,
            campaign_id: b.campaign_id,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}
