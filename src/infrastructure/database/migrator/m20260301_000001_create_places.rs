//! Create places and opening_hours tables
//!
//! Opening hours are stored per weekday as minute offsets; a weekday
//! without a row is closed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Places::Name).string().not_null())
                    .col(
                        ColumnDef::new(Places::BookingEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Places::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Places::SlotGranularityMinutes).integer())
                    .col(
                        ColumnDef::new(Places::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OpeningHours::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OpeningHours::PlaceId).integer().not_null())
                    .col(ColumnDef::new(OpeningHours::Weekday).integer().not_null())
                    .col(ColumnDef::new(OpeningHours::OpensAt).integer().not_null())
                    .col(ColumnDef::new(OpeningHours::ClosesAt).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(OpeningHours::PlaceId)
                            .col(OpeningHours::Weekday),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opening_hours_place")
                            .from(OpeningHours::Table, OpeningHours::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OpeningHours::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Places {
    Table,
    Id,
    Name,
    BookingEnabled,
    IsActive,
    SlotGranularityMinutes,
    CreatedAt,
}

#[derive(Iden)]
pub enum OpeningHours {
    Table,
    PlaceId,
    Weekday,
    OpensAt,
    ClosesAt,
}
