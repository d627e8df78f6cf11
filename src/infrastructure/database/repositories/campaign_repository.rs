//! SeaORM implementation of CampaignRepository

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::{corrupt, db_err};
use crate::domain::campaign::{CampaignRepository, CampaignWindow};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::campaign;

pub struct SeaOrmCampaignRepository {
    db: DatabaseConnection,
}

impl SeaOrmCampaignRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: campaign::Model) -> DomainResult<CampaignWindow> {
    let window = CampaignWindow::new(m.id, m.place_id, m.title, m.starts_at, m.ends_at)
        .map_err(|e| corrupt("campaigns", m.id, e))?;
    Ok(match m.description {
        Some(description) => window.with_description(description),
        None => window,
    })
}

#[async_trait]
impl CampaignRepository for SeaOrmCampaignRepository {
    async fn find_active(
        &self,
        place_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> DomainResult<Vec<CampaignWindow>> {
        campaign::Entity::find()
            .filter(campaign::Column::PlaceId.eq(place_id))
            .filter(campaign::Column::StartsAt.lt(to))
            .filter(campaign::Column::EndsAt.gt(from))
            .order_by_asc(campaign::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }
}
