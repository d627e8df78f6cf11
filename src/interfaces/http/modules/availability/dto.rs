//! Availability DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{AvailabilityReport, Slot};
use crate::domain::calendar::TimeRange;
use crate::domain::CampaignWindow;

/// Availability query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityParams {
    /// Day to inspect, `YYYY-MM-DD`
    pub date: String,
    /// Comma separated service ids, performed back to back
    pub service_ids: String,
    /// Only consider this staff member
    pub staff_id: Option<i32>,
    /// Earliest start to report, `HH:MM`
    pub from: Option<String>,
    /// Report starts strictly before this time, `HH:MM`
    pub to: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CampaignDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
}

impl From<&CampaignWindow> for CampaignDto {
    fn from(c: &CampaignWindow) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            description: c.description.clone(),
            starts_at: c.starts_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ends_at: c.ends_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlotDto {
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
    pub available: bool,
    pub free_staff_count: usize,
    pub free_staff_ids: Vec<i32>,
    pub campaigns: Vec<CampaignDto>,
}

impl SlotDto {
    fn from_slot(slot: &Slot, duration_minutes: u32) -> Self {
        let end = TimeRange::starting_at(slot.start, duration_minutes)
            .map(|r| r.end().to_string())
            .unwrap_or_default();
        Self {
            start: slot.start.to_string(),
            end,
            available: slot.available,
            free_staff_count: slot.free_staff_count(),
            free_staff_ids: slot.free_staff_ids.clone(),
            campaigns: slot.campaigns.iter().map(CampaignDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub place_id: i32,
    pub date: String,
    pub service_ids: Vec<i32>,
    pub staff_id: Option<i32>,
    pub total_duration_minutes: u32,
    /// Decimal as string
    pub total_price: String,
    pub granularity_minutes: u16,
    /// `place_closed` or `booking_disabled` when the day has no slots at all
    pub closed: Option<String>,
    pub slots: Vec<SlotDto>,
}

impl From<AvailabilityReport> for AvailabilityDto {
    fn from(report: AvailabilityReport) -> Self {
        let duration = report.total_duration_minutes;
        Self {
            place_id: report.place_id,
            date: report.date.to_string(),
            staff_id: report.staff_id,
            total_duration_minutes: duration,
            total_price: report.total_price.to_string(),
            granularity_minutes: report.granularity_minutes,
            closed: report.closed.map(|c| c.as_str().to_string()),
            slots: report
                .slots
                .iter()
                .map(|s| SlotDto::from_slot(s, duration))
                .collect(),
            service_ids: report.service_ids,
        }
    }
}
