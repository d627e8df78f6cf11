//! Service catalog aggregate
//!
//! Bookable offerings of a place and the read-only catalog interface.

pub mod model;
pub mod repository;

pub use model::{total_duration_minutes, total_price, Service};
pub use repository::ServiceCatalog;
