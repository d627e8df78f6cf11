//! Service domain entity

use rust_decimal::Decimal;

/// A bookable offering of a place
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: i32,
    pub place_id: i32,
    pub name: String,
    /// Positive, normally a multiple of the place's slot granularity
    pub duration_minutes: u32,
    pub price: Decimal,
    /// Deactivated services stay in the catalog for booking history
    pub is_active: bool,
}

impl Service {
    pub fn new(
        id: i32,
        place_id: i32,
        name: impl Into<String>,
        duration_minutes: u32,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            place_id,
            name: name.into(),
            duration_minutes,
            price,
            is_active: true,
        }
    }

    /// Whether the service can be booked at `place_id` right now
    pub fn is_bookable_at(&self, place_id: i32) -> bool {
        self.is_active && self.place_id == place_id && self.duration_minutes > 0
    }
}

/// Services of one booking run back to back, so durations add up.
pub fn total_duration_minutes<'a>(services: impl IntoIterator<Item = &'a Service>) -> u32 {
    services.into_iter().map(|s| s.duration_minutes).sum()
}

pub fn total_price<'a>(services: impl IntoIterator<Item = &'a Service>) -> Decimal {
    services.into_iter().map(|s| s.price).sum()
}
