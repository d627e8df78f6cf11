//! Staff aggregate
//!
//! Staff members of a place with their service eligibility.

pub mod model;
pub mod repository;

pub use model::StaffMember;
pub use repository::StaffRepository;
