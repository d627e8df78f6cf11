//! Booking ledger entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub place_id: i32,
    pub staff_id: i32,
    pub booking_date: Date,

    /// Minutes since local midnight, half-open `[start_minute, end_minute)`
    pub start_minute: i32,
    pub end_minute: i32,

    /// Decimal stored as text
    pub total_price: String,

    /// Booking status: pending, confirmed, cancelled, completed
    pub status: String,

    pub customer_name: String,
    pub customer_phone: String,

    #[sea_orm(nullable)]
    pub customer_email: Option<String>,

    #[sea_orm(nullable)]
    pub campaign_id: Option<i32>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking_service::Entity")]
    BookingServices,
    #[sea_orm(
        belongs_to = "super::staff_member::Entity",
        from = "Column::StaffId",
        to = "super::staff_member::Column::Id"
    )]
    StaffMember,
}

impl Related<super::booking_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingServices.def()
    }
}

impl Related<super::staff_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
