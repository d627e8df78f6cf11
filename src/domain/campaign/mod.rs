//! Campaign aggregate
//!
//! Time-bounded promotional windows that annotate slots.

pub mod model;
pub mod repository;

pub use model::CampaignWindow;
pub use repository::CampaignRepository;
