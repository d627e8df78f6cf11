//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_places;
mod m20260301_000002_create_services;
mod m20260301_000003_create_staff;
mod m20260301_000004_create_time_off;
mod m20260301_000005_create_campaigns;
mod m20260301_000006_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_places::Migration),
            Box::new(m20260301_000002_create_services::Migration),
            Box::new(m20260301_000003_create_staff::Migration),
            Box::new(m20260301_000004_create_time_off::Migration),
            Box::new(m20260301_000005_create_campaigns::Migration),
            Box::new(m20260301_000006_create_bookings::Migration),
        ]
    }
}
