//! Create campaigns table

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_places::Places;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::PlaceId).integer().not_null())
                    .col(ColumnDef::new(Campaigns::Title).string().not_null())
                    .col(ColumnDef::new(Campaigns::Description).string())
                    .col(ColumnDef::new(Campaigns::StartsAt).date_time().not_null())
                    .col(ColumnDef::new(Campaigns::EndsAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaigns_place")
                            .from(Campaigns::Table, Campaigns::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_campaigns_place_range")
                    .table(Campaigns::Table)
                    .col(Campaigns::PlaceId)
                    .col(Campaigns::StartsAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Campaigns {
    Table,
    Id,
    PlaceId,
    Title,
    Description,
    StartsAt,
    EndsAt,
}
