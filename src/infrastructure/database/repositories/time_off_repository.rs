//! SeaORM implementation of TimeOffRepository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::{corrupt, db_err};
use crate::domain::time_off::{TimeOffPeriod, TimeOffRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::time_off;

pub struct SeaOrmTimeOffRepository {
    db: DatabaseConnection,
}

impl SeaOrmTimeOffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TimeOffRepository for SeaOrmTimeOffRepository {
    async fn find_overlapping(
        &self,
        staff_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> DomainResult<Vec<TimeOffPeriod>> {
        time_off::Entity::find()
            .filter(time_off::Column::StaffId.eq(staff_id))
            .filter(time_off::Column::StartsAt.lt(to))
            .filter(time_off::Column::EndsAt.gt(from))
            .order_by_asc(time_off::Column::StartsAt)
            .order_by_asc(time_off::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|m| {
                TimeOffPeriod::new(m.id, m.staff_id, m.starts_at, m.ends_at)
                    .map_err(|e| corrupt("time_off", m.id, e))
            })
            .collect()
    }
}
