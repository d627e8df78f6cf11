//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod campaign_repository;
pub mod place_repository;
pub mod repository_provider;
pub mod service_repository;
pub mod staff_repository;
pub mod time_off_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// A stored row that cannot be turned into a valid domain value
pub(crate) fn corrupt(entity: &str, id: impl std::fmt::Display, detail: impl std::fmt::Display) -> DomainError {
    DomainError::Storage(format!("Invalid {} row {}: {}", entity, id, detail))
}
