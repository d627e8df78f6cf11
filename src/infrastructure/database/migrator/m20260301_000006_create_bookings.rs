//! Create bookings and booking_services tables
//!
//! Overlap checks filter on (staff_id, booking_date), so that pair is
//! indexed together with the start minute. Ids are SQLite `INTEGER`,
//! which is 64-bit and maps onto the entity's `i64`.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_places::Places;
use super::m20260301_000003_create_staff::StaffMembers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::PlaceId).integer().not_null())
                    .col(ColumnDef::new(Bookings::StaffId).integer().not_null())
                    .col(ColumnDef::new(Bookings::BookingDate).date().not_null())
                    .col(ColumnDef::new(Bookings::StartMinute).integer().not_null())
                    .col(ColumnDef::new(Bookings::EndMinute).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::TotalPrice)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Bookings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerPhone).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerEmail).string())
                    .col(ColumnDef::new(Bookings::CampaignId).integer())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_place")
                            .from(Bookings::Table, Bookings::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_staff")
                            .from(Bookings::Table, Bookings::StaffId)
                            .to(StaffMembers::Table, StaffMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_staff_day")
                    .table(Bookings::Table)
                    .col(Bookings::StaffId)
                    .col(Bookings::BookingDate)
                    .col(Bookings::StartMinute)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_place_day")
                    .table(Bookings::Table)
                    .col(Bookings::PlaceId)
                    .col(Bookings::BookingDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingServices::BookingId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BookingServices::Position).integer().not_null())
                    .col(ColumnDef::new(BookingServices::ServiceId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookingServices::BookingId)
                            .col(BookingServices::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_services_booking")
                            .from(BookingServices::Table, BookingServices::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    PlaceId,
    StaffId,
    BookingDate,
    StartMinute,
    EndMinute,
    TotalPrice,
    Status,
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    CampaignId,
    CreatedAt,
}

#[derive(Iden)]
pub enum BookingServices {
    Table,
    BookingId,
    Position,
    ServiceId,
}
