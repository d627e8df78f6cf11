//! Domain layer: entities, calendar math, and repository interfaces

pub mod booking;
pub mod calendar;
pub mod campaign;
pub mod catalog;
pub mod place;
pub mod repositories;
pub mod staff;
pub mod time_off;

// Re-export commonly used types
pub use booking::{Booking, BookingLedger, BookingStatus, CustomerInfo, NewBooking, StaffSelector};
pub use calendar::{TimeOfDay, TimeRange};
pub use campaign::{CampaignRepository, CampaignWindow};
pub use catalog::{Service, ServiceCatalog};
pub use place::{DayHours, OpeningHours, Place, PlaceRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use staff::{StaffMember, StaffRepository};
pub use time_off::{TimeOffPeriod, TimeOffRepository};

pub use crate::shared::errors::DomainError;
