//! SeaORM implementation of ServiceCatalog

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::{corrupt, db_err};
use crate::domain::catalog::{Service, ServiceCatalog};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::service;

pub struct SeaOrmServiceCatalog {
    db: DatabaseConnection,
}

impl SeaOrmServiceCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: service::Model) -> DomainResult<Service> {
    let duration_minutes = u32::try_from(m.duration_minutes)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| corrupt("services", m.id, format!("duration {}", m.duration_minutes)))?;
    let price = Decimal::from_str(&m.price)
        .map_err(|e| corrupt("services", m.id, format!("price '{}': {}", m.price, e)))?;
    Ok(Service {
        id: m.id,
        place_id: m.place_id,
        name: m.name,
        duration_minutes,
        price,
        is_active: m.is_active,
    })
}

#[async_trait]
impl ServiceCatalog for SeaOrmServiceCatalog {
    async fn find_for_place(&self, place_id: i32) -> DomainResult<Vec<Service>> {
        service::Entity::find()
            .filter(service::Column::PlaceId.eq(place_id))
            .order_by_asc(service::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Service>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        service::Entity::find()
            .filter(service::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(service::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }
}
