//! Application layer: use-case services over the domain repositories

pub mod availability;
pub mod booking;
pub mod compatibility;
pub(crate) mod schedule;

pub use availability::{
    AvailabilityQuery, AvailabilityReport, AvailabilityService, ClosedReason, Slot, SlotGrid,
};
pub use booking::{BookingRequest, BookingService};
pub use compatibility::CompatibilityService;
