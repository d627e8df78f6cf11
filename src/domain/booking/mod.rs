//! Booking aggregate
//!
//! Contains the Booking entity, related value types, and the ledger interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus, CustomerInfo, NewBooking, StaffSelector};
pub use repository::BookingLedger;
