//! Campaign window domain entity

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::shared::errors::DomainError;

/// Promotional window of a place. Advisory: it annotates slots but never
/// creates or blocks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignWindow {
    pub id: i32,
    pub place_id: i32,
    pub title: String,
    /// Discount or reward shown to the customer
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

impl CampaignWindow {
    pub fn new(
        id: i32,
        place_id: i32,
        title: impl Into<String>,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        if starts_at > ends_at {
            return Err(DomainError::InvalidRequest(format!(
                "campaign {} ends before it starts",
                id
            )));
        }
        Ok(Self {
            id,
            place_id,
            title: title.into(),
            description: None,
            starts_at,
            ends_at,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Half-open `[starts_at, ends_at)` membership
    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        self.starts_at <= instant && instant < self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn covers_is_half_open() {
        let c = CampaignWindow::new(1, 1, "Morning", at(9, 0), at(12, 0)).unwrap();
        assert!(c.covers(at(9, 0)));
        assert!(c.covers(at(11, 45)));
        assert!(!c.covers(at(12, 0)));
        assert!(!c.covers(at(8, 59)));
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(CampaignWindow::new(1, 1, "Bad", at(12, 0), at(9, 0)).is_err());
        assert!(CampaignWindow::new(1, 1, "Instant", at(9, 0), at(9, 0)).is_ok());
    }
}
