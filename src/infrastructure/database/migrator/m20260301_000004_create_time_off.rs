//! Create time_off table

use sea_orm_migration::prelude::*;

use super::m20260301_000003_create_staff::StaffMembers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeOff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeOff::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeOff::StaffId).integer().not_null())
                    .col(ColumnDef::new(TimeOff::StartsAt).date_time().not_null())
                    .col(ColumnDef::new(TimeOff::EndsAt).date_time().not_null())
                    .col(ColumnDef::new(TimeOff::Reason).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_off_staff")
                            .from(TimeOff::Table, TimeOff::StaffId)
                            .to(StaffMembers::Table, StaffMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_off_staff_range")
                    .table(TimeOff::Table)
                    .col(TimeOff::StaffId)
                    .col(TimeOff::StartsAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeOff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TimeOff {
    Table,
    Id,
    StaffId,
    StartsAt,
    EndsAt,
    Reason,
}
