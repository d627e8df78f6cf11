//! Opening hours entity
//!
//! One row per open weekday; a missing weekday means closed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "opening_hours")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub place_id: i32,

    /// 0 = Monday .. 6 = Sunday
    #[sea_orm(primary_key, auto_increment = false)]
    pub weekday: i32,

    /// Minutes since local midnight
    pub opens_at: i32,
    /// Minutes since local midnight, exclusive; 1440 closes at midnight
    pub closes_at: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::place::Entity",
        from = "Column::PlaceId",
        to = "super::place::Column::Id"
    )]
    Place,
}

impl Related<super::place::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Place.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
