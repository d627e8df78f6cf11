//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::booking::BookingLedger;
use super::campaign::CampaignRepository;
use super::catalog::ServiceCatalog;
use super::place::PlaceRepository;
use super::staff::StaffRepository;
use super::time_off::TimeOffRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let place = repos.places().find_by_id(1).await?;
///     let bookings = repos.bookings().find_active_for_staff_on(7, date).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn places(&self) -> &dyn PlaceRepository;
    fn services(&self) -> &dyn ServiceCatalog;
    fn staff(&self) -> &dyn StaffRepository;
    fn time_off(&self) -> &dyn TimeOffRepository;
    fn bookings(&self) -> &dyn BookingLedger;
    fn campaigns(&self) -> &dyn CampaignRepository;
}
