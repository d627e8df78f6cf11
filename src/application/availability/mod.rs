//! Slot availability
//!
//! Start-time grid generation and the read-only availability calculator.

pub mod grid;
pub mod service;

pub use grid::{SlotGrid, SlotIter};
pub use service::{AvailabilityQuery, AvailabilityReport, AvailabilityService, ClosedReason, Slot};
