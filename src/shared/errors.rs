use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::booking::BookingStatus;
use crate::domain::calendar::TimeOfDay;

/// Coarse classification used by callers to pick a user-facing message
/// and by the HTTP layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ClosedPeriod,
    Ineligibility,
    Unavailability,
    InvalidRequest,
    Internal,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Place {place_id} is closed for booking on {date}")]
    PlaceClosed { place_id: i32, date: NaiveDate },

    #[error("Service {0} is unknown or inactive for this place")]
    ServiceUnknownOrInactive(i32),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("No staff member can perform the requested services")]
    NoEligibleStaff,

    #[error("Staff member {0} cannot perform the requested services")]
    IneligibleStaff(i32),

    #[error("Staff member {0} is unavailable at the requested time")]
    StaffUnavailable(i32),

    #[error("Slot {start} on {date} is already taken for staff member {staff_id}")]
    SlotConflict {
        staff_id: i32,
        date: NaiveDate,
        start: TimeOfDay,
    },

    #[error("Booking cannot move from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } | DomainError::ServiceUnknownOrInactive(_) => {
                ErrorKind::NotFound
            }
            DomainError::PlaceClosed { .. } => ErrorKind::ClosedPeriod,
            DomainError::NoEligibleStaff | DomainError::IneligibleStaff(_) => {
                ErrorKind::Ineligibility
            }
            DomainError::StaffUnavailable(_) | DomainError::SlotConflict { .. } => {
                ErrorKind::Unavailability
            }
            DomainError::InvalidRequest(_)
            | DomainError::InvalidDuration(_)
            | DomainError::InvalidTransition { .. } => ErrorKind::InvalidRequest,
            DomainError::Storage(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code, part of the public API contract.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "not_found",
            DomainError::InvalidRequest(_) => "invalid_request",
            DomainError::PlaceClosed { .. } => "place_closed",
            DomainError::ServiceUnknownOrInactive(_) => "service_unknown_or_inactive",
            DomainError::InvalidDuration(_) => "invalid_duration",
            DomainError::NoEligibleStaff => "no_eligible_staff",
            DomainError::IneligibleStaff(_) => "ineligible_staff",
            DomainError::StaffUnavailable(_) => "staff_unavailable",
            DomainError::SlotConflict { .. } => "slot_conflict",
            DomainError::InvalidTransition { .. } => "invalid_transition",
            DomainError::Storage(_) => "internal",
        }
    }

    /// Whether this error is part of normal booking control flow rather
    /// than a server fault. Expected outcomes are never logged as errors.
    pub fn is_expected(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}
