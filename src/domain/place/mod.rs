//! Place aggregate
//!
//! Contains the Place entity, its weekly opening hours, and repository interface.

pub mod model;
pub mod repository;

pub use model::{DayHours, OpeningHours, Place, DEFAULT_SLOT_GRANULARITY_MINUTES};
pub use repository::PlaceRepository;
