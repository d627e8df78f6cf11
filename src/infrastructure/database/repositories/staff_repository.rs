//! SeaORM implementation of StaffRepository
//!
//! Eligibility sets come from `staff_services` and are loaded with the
//! staff rows in one extra query.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::db_err;
use crate::domain::staff::{StaffMember, StaffRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{staff_member, staff_service};

pub struct SeaOrmStaffRepository {
    db: DatabaseConnection,
}

impl SeaOrmStaffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_services(&self, models: Vec<staff_member::Model>) -> DomainResult<Vec<StaffMember>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let links = staff_service::Entity::find()
            .filter(staff_service::Column::StaffId.is_in(models.iter().map(|m| m.id)))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_staff: HashMap<i32, BTreeSet<i32>> = HashMap::new();
        for link in links {
            by_staff.entry(link.staff_id).or_default().insert(link.service_id);
        }

        Ok(models
            .into_iter()
            .map(|m| StaffMember {
                service_ids: by_staff.remove(&m.id).unwrap_or_default(),
                id: m.id,
                place_id: m.place_id,
                name: m.name,
                is_active: m.is_active,
            })
            .collect())
    }
}

#[async_trait]
impl StaffRepository for SeaOrmStaffRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<StaffMember>> {
        let model = staff_member::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(self.with_services(vec![model]).await?.pop())
    }

    async fn find_for_place(&self, place_id: i32) -> DomainResult<Vec<StaffMember>> {
        let models = staff_member::Entity::find()
            .filter(staff_member::Column::PlaceId.eq(place_id))
            .order_by_asc(staff_member::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.with_services(models).await
    }
}
