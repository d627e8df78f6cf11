//! Time-off aggregate
//!
//! Hard unavailability windows per staff member.

pub mod model;
pub mod repository;

pub use model::TimeOffPeriod;
pub use repository::TimeOffRepository;
