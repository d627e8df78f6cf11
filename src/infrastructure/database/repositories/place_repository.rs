//! SeaORM implementation of PlaceRepository

use async_trait::async_trait;
use chrono::Weekday;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::debug;

use super::{corrupt, db_err};
use crate::domain::calendar::{TimeOfDay, TimeRange};
use crate::domain::place::{DayHours, OpeningHours, Place, PlaceRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{opening_hours, place};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub struct SeaOrmPlaceRepository {
    db: DatabaseConnection,
    default_granularity: u16,
}

impl SeaOrmPlaceRepository {
    pub fn new(db: DatabaseConnection, default_granularity: u16) -> Self {
        Self {
            db,
            default_granularity,
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn minute(place_id: i32, raw: i32) -> DomainResult<TimeOfDay> {
    u16::try_from(raw)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| corrupt("opening_hours", place_id, format!("minute {} out of range", raw)))
}

fn hours_from_rows(place_id: i32, rows: Vec<opening_hours::Model>) -> DomainResult<OpeningHours> {
    let mut hours = OpeningHours::closed();
    for row in rows {
        let weekday = usize::try_from(row.weekday)
            .ok()
            .and_then(|i| WEEKDAYS.get(i).copied())
            .ok_or_else(|| corrupt("opening_hours", place_id, format!("weekday {}", row.weekday)))?;
        let range = TimeRange::new(minute(place_id, row.opens_at)?, minute(place_id, row.closes_at)?)
            .map_err(|e| corrupt("opening_hours", place_id, e))?;
        hours = hours.with_day(weekday, DayHours::Open(range));
    }
    Ok(hours)
}

// ── PlaceRepository impl ────────────────────────────────────────

#[async_trait]
impl PlaceRepository for SeaOrmPlaceRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Place>> {
        let Some(model) = place::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let rows = opening_hours::Entity::find()
            .filter(opening_hours::Column::PlaceId.eq(id))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        debug!(place_id = id, open_days = rows.len(), "Loaded place");

        let granularity = match model.slot_granularity_minutes {
            Some(raw) => u16::try_from(raw)
                .ok()
                .filter(|m| *m > 0)
                .ok_or_else(|| corrupt("places", id, format!("granularity {}", raw)))?,
            None => self.default_granularity,
        };

        Ok(Some(Place {
            id: model.id,
            name: model.name,
            opening_hours: hours_from_rows(id, rows)?,
            booking_enabled: model.booking_enabled,
            is_active: model.is_active,
            slot_granularity_minutes: granularity,
        }))
    }
}
