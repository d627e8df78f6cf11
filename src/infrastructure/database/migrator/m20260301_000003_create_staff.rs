//! Create staff_members and staff_services tables

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_places::Places;
use super::m20260301_000002_create_services::Services;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffMembers::PlaceId).integer().not_null())
                    .col(ColumnDef::new(StaffMembers::Name).string().not_null())
                    .col(
                        ColumnDef::new(StaffMembers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_members_place")
                            .from(StaffMembers::Table, StaffMembers::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_members_place")
                    .table(StaffMembers::Table)
                    .col(StaffMembers::PlaceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaffServices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StaffServices::StaffId).integer().not_null())
                    .col(ColumnDef::new(StaffServices::ServiceId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(StaffServices::StaffId)
                            .col(StaffServices::ServiceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_services_staff")
                            .from(StaffServices::Table, StaffServices::StaffId)
                            .to(StaffMembers::Table, StaffMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_services_service")
                            .from(StaffServices::Table, StaffServices::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum StaffMembers {
    Table,
    Id,
    PlaceId,
    Name,
    IsActive,
}

#[derive(Iden)]
pub enum StaffServices {
    Table,
    StaffId,
    ServiceId,
}
