//! # Slotbook
//!
//! Appointment availability and slot-conflict engine for service
//! businesses: which start times are free for a set of services, and
//! committing a booking so that no staff member is ever double-booked.
//!
//! ## Architecture
//!
//! - **domain**: entities, calendar math and repository traits
//! - **application**: availability calculator, booking commit, compatibility lookups
//! - **infrastructure**: SeaORM/SQLite persistence, an in-memory provider and graceful shutdown
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error taxonomy

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_api_router;
