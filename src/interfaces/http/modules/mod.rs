pub mod availability;
pub mod bookings;
pub mod compatibility;
pub mod health;
pub mod metrics;
pub mod request_id;
