//! Booking commits and lifecycle

pub mod locks;
pub mod service;

pub use locks::{StaffDayGuard, StaffDayLocks};
pub use service::{BookingRequest, BookingService};
