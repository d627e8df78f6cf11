//! Database entities module

pub mod booking;
pub mod booking_service;
pub mod campaign;
pub mod opening_hours;
pub mod place;
pub mod service;
pub mod staff_member;
pub mod staff_service;
pub mod time_off;

pub use booking::Entity as Booking;
pub use booking_service::Entity as BookingService;
pub use campaign::Entity as Campaign;
pub use opening_hours::Entity as OpeningHours;
pub use place::Entity as Place;
pub use service::Entity as Service;
pub use staff_member::Entity as StaffMember;
pub use staff_service::Entity as StaffService;
pub use time_off::Entity as TimeOff;
