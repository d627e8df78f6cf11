//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingLedger;
use crate::domain::campaign::CampaignRepository;
use crate::domain::catalog::ServiceCatalog;
use crate::domain::place::{PlaceRepository, DEFAULT_SLOT_GRANULARITY_MINUTES};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::staff::StaffRepository;
use crate::domain::time_off::TimeOffRepository;

use super::booking_repository::SeaOrmBookingLedger;
use super::campaign_repository::SeaOrmCampaignRepository;
use super::place_repository::SeaOrmPlaceRepository;
use super::service_repository::SeaOrmServiceCatalog;
use super::staff_repository::SeaOrmStaffRepository;
use super::time_off_repository::SeaOrmTimeOffRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let place = repos.places().find_by_id(1).await?;
/// let booked = repos.bookings().find_active_for_staff_on(7, date).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    places: SeaOrmPlaceRepository,
    services: SeaOrmServiceCatalog,
    staff: SeaOrmStaffRepository,
    time_off: SeaOrmTimeOffRepository,
    bookings: SeaOrmBookingLedger,
    campaigns: SeaOrmCampaignRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_default_granularity(db, DEFAULT_SLOT_GRANULARITY_MINUTES)
    }

    /// `default_granularity` applies to places without their own setting
    pub fn with_default_granularity(db: DatabaseConnection, default_granularity: u16) -> Self {
        Self {
            places: SeaOrmPlaceRepository::new(db.clone(), default_granularity),
            services: SeaOrmServiceCatalog::new(db.clone()),
            staff: SeaOrmStaffRepository::new(db.clone()),
            time_off: SeaOrmTimeOffRepository::new(db.clone()),
            campaigns: SeaOrmCampaignRepository::new(db.clone()),
            bookings: SeaOrmBookingLedger::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn places(&self) -> &dyn PlaceRepository {
        &self.places
    }

    fn services(&self) -> &dyn ServiceCatalog {
        &self.services
    }

    fn staff(&self) -> &dyn StaffRepository {
        &self.staff
    }

    fn time_off(&self) -> &dyn TimeOffRepository {
        &self.time_off
    }

    fn bookings(&self) -> &dyn BookingLedger {
        &self.bookings
    }

    fn campaigns(&self) -> &dyn CampaignRepository {
        &self.campaigns
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc, Weekday};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Set};

    use super::*;
    use crate::application::{AvailabilityQuery, AvailabilityService, BookingRequest, BookingService};
    use crate::domain::calendar::{instant_at, TimeOfDay};
    use crate::domain::{BookingStatus, CustomerInfo, DomainError, NewBooking, StaffSelector};
    use crate::infrastructure::database::entities::{
        campaign, opening_hours, place, service, staff_member, staff_service, time_off,
    };
    use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn at(time: &str) -> NaiveDateTime {
        instant_at(monday(), t(time))
    }

    /// Place 1 open Mon-Sat 09:00-18:00. Service 10 (30 min, 25.00) and
    /// 11 (60 min, 60.00). Staff 1 does both, staff 2 only 10 and is off
    /// 12:00-13:00 on the Monday. Campaign 4 runs 15:00-16:00.
    async fn seed(db: &DatabaseConnection) {
        run_migrations(db).await.unwrap();

        place::ActiveModel {
            id: Set(1),
            name: Set("Studio".into()),
            booking_enabled: Set(true),
            is_active: Set(true),
            slot_granularity_minutes: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();

        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ] {
            opening_hours::ActiveModel {
                place_id: Set(1),
                weekday: Set(weekday.num_days_from_monday() as i32),
                opens_at: Set(9 * 60),
                closes_at: Set(18 * 60),
            }
            .insert(db)
            .await
            .unwrap();
        }

        for (id, name, minutes, price) in [(10, "Cut", 30, "25.00"), (11, "Color", 60, "60.00")] {
            service::ActiveModel {
                id: Set(id),
                place_id: Set(1),
                name: Set(name.into()),
                duration_minutes: Set(minutes),
                price: Set(price.into()),
                is_active: Set(true),
            }
            .insert(db)
            .await
            .unwrap();
        }

        for (id, name) in [(1, "Ana"), (2, "Ben")] {
            staff_member::ActiveModel {
                id: Set(id),
                place_id: Set(1),
                name: Set(name.into()),
                is_active: Set(true),
            }
            .insert(db)
            .await
            .unwrap();
        }
        for (staff_id, service_id) in [(1, 10), (1, 11), (2, 10)] {
            staff_service::ActiveModel {
                staff_id: Set(staff_id),
                service_id: Set(service_id),
            }
            .insert(db)
            .await
            .unwrap();
        }

        time_off::ActiveModel {
            id: Set(1),
            staff_id: Set(2),
            starts_at: Set(at("12:00")),
            ends_at: Set(at("13:00")),
            reason: Set(Some("Dentist".into())),
        }
        .insert(db)
        .await
        .unwrap();

        campaign::ActiveModel {
            id: Set(4),
            place_id: Set(1),
            title: Set("Happy hour".into()),
            description: Set(Some("-20%".into())),
            starts_at: Set(at("15:00")),
            ends_at: Set(at("16:00")),
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn seeded_db() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        seed(&db).await;
        db
    }

    fn new_booking(staff_id: i32, start: &str) -> NewBooking {
        NewBooking {
            place_id: 1,
            service_ids: vec![10],
            staff_id,
            date: monday(),
            start: t(start),
            duration_minutes: 30,
            total_price: Decimal::new(2500, 2),
            status: BookingStatus::Pending,
            customer: CustomerInfo {
                name: "Sam".into(),
                phone: "+15550123".into(),
                email: Some("sam@example.com".into()),
            },
            campaign_id: None,
        }
    }

    #[tokio::test]
    async fn loads_place_with_hours_and_default_granularity() {
        let repos = SeaOrmRepositoryProvider::with_default_granularity(seeded_db().await, 20);
        let place = repos.places().find_by_id(1).await.unwrap().unwrap();

        assert_eq!(place.slot_granularity_minutes, 20);
        assert_eq!(
            place.hours_on(monday()).range().map(|r| r.to_string()),
            Some("09:00-18:00".to_string())
        );
        assert!(!place.opening_hours.for_weekday(Weekday::Sun).is_open());
        assert!(repos.places().find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn loads_services_and_eligibility_sets() {
        let repos = SeaOrmRepositoryProvider::new(seeded_db().await);

        let services = repos.services().find_by_ids(&[11, 10]).await.unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].price, Decimal::new(2500, 2));
        assert_eq!(services[1].duration_minutes, 60);

        let staff = repos.staff().find_for_place(1).await.unwrap();
        assert_eq!(staff.len(), 2);
        assert!(staff[0].can_perform_all(&[10, 11]));
        assert!(!staff[1].can_perform_all(&[10, 11]));
    }

    #[tokio::test]
    async fn time_off_and_campaign_range_queries() {
        let repos = SeaOrmRepositoryProvider::new(seeded_db().await);

        let off = repos
            .time_off()
            .find_overlapping(2, at("11:00"), at("12:30"))
            .await
            .unwrap();
        assert_eq!(off.len(), 1);
        let off = repos
            .time_off()
            .find_overlapping(2, at("13:00"), at("14:00"))
            .await
            .unwrap();
        assert!(off.is_empty());

        let campaigns = repos
            .campaigns()
            .find_active(1, at("15:30"), at("15:31"))
            .await
            .unwrap();
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].description.as_deref(), Some("-20%"));
    }

    #[tokio::test]
    async fn ledger_rejects_overlap_and_frees_on_cancel() {
        let repos = SeaOrmRepositoryProvider::new(seeded_db().await);
        let ledger = repos.bookings();

        let first = ledger.insert_exclusive(new_booking(1, "10:00")).await.unwrap();
        assert_eq!(first.service_ids, vec![10]);

        let err = ledger.insert_exclusive(new_booking(1, "10:15")).await.unwrap_err();
        assert!(matches!(err, DomainError::SlotConflict { staff_id: 1, .. }));

        ledger.insert_exclusive(new_booking(1, "10:30")).await.unwrap();
        assert!(ledger
            .update_status(first.id, BookingStatus::Pending, BookingStatus::Cancelled)
            .await
            .unwrap());
        ledger.insert_exclusive(new_booking(1, "10:00")).await.unwrap();

        let stored = ledger.find_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
        assert_eq!(stored.customer.email.as_deref(), Some("sam@example.com"));
        assert_eq!(ledger.find_active_for_staff_on(1, monday()).await.unwrap().len(), 2);
        assert_eq!(ledger.find_for_place_on(1, monday()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn commit_then_availability_reflects_booking() {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(seeded_db().await));
        let bookings = BookingService::new(repos.clone(), BookingStatus::Pending);
        let availability = AvailabilityService::new(repos);

        let booking = bookings
            .commit_booking(BookingRequest {
                place_id: 1,
                service_ids: vec![10, 11],
                staff: StaffSelector::AnyAvailable,
                date: monday(),
                start: t("15:00"),
                customer: CustomerInfo {
                    name: "Jo".into(),
                    phone: "+15550999".into(),
                    email: None,
                },
                campaign_id: None,
            })
            .await
            .unwrap();
        assert_eq!(booking.staff_id, 1);
        assert_eq!(booking.duration_minutes, 90);
        assert_eq!(booking.total_price, Decimal::new(8500, 2));
        assert_eq!(booking.campaign_id, Some(4));

        let report = availability
            .compute_availability(&AvailabilityQuery::new(1, monday(), vec![10]).with_staff(1))
            .await
            .unwrap();
        assert!(report.slot_at(t("14:30")).unwrap().available);
        assert!(!report.slot_at(t("14:45")).unwrap().available);
        assert!(!report.slot_at(t("16:15")).unwrap().available);
        assert!(report.slot_at(t("16:30")).unwrap().available);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_commits_on_database_have_one_winner() {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(seeded_db().await));
        let service = Arc::new(BookingService::new(repos.clone(), BookingStatus::Pending));

        let mut tasks = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                service
                    .commit_booking(BookingRequest {
                        place_id: 1,
                        service_ids: vec![10],
                        staff: StaffSelector::Explicit(1),
                        date: monday(),
                        start: if i % 2 == 0 { t("10:00") } else { t("10:15") },
                        customer: CustomerInfo {
                            name: format!("Customer {i}"),
                            phone: "+15550000".into(),
                            email: None,
                        },
                        campaign_id: None,
                    })
                    .await
            }));
        }

        let mut won = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => won += 1,
                Err(DomainError::SlotConflict { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(won, 1);
        assert_eq!(
            repos.bookings().find_active_for_staff_on(1, monday()).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn status_write_is_conditional_on_current_status() {
        let repos = SeaOrmRepositoryProvider::new(seeded_db().await);
        let ledger = repos.bookings();
        let booking = ledger.insert_exclusive(new_booking(1, "11:00")).await.unwrap();

        assert!(ledger
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap());
        assert!(!ledger
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Cancelled)
            .await
            .unwrap());
        let stored = ledger.find_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);

        let err = ledger
            .update_status(9999, BookingStatus::Pending, BookingStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    /// Two connection pools on one database file stand in for two server
    /// processes. Losers must see a slot conflict, never a storage error.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn commits_from_separate_pools_on_one_file_have_one_winner() {
        let path = std::env::temp_dir().join(format!("slotbook-{}.db", uuid::Uuid::new_v4()));
        let config = DatabaseConfig::sqlite(&path.to_string_lossy());

        let first_db = init_database(&config).await.unwrap();
        seed(&first_db).await;
        let second_db = init_database(&config).await.unwrap();

        let services: Vec<Arc<BookingService>> = [first_db, second_db]
            .into_iter()
            .map(|db| {
                let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
                Arc::new(BookingService::new(repos, BookingStatus::Pending))
            })
            .collect();

        for round in 0..10u16 {
            let start = TimeOfDay::from_minutes(10 * 60 + round * 30).unwrap();
            let staggered = TimeOfDay::from_minutes(10 * 60 + round * 30 + 15).unwrap();

            let mut tasks = Vec::new();
            for i in 0..4 {
                let service = services[i % 2].clone();
                tasks.push(tokio::spawn(async move {
                    service
                        .commit_booking(BookingRequest {
                            place_id: 1,
                            service_ids: vec![10],
                            staff: StaffSelector::Explicit(1),
                            date: monday(),
                            start: if i < 2 { start } else { staggered },
                            customer: CustomerInfo {
                                name: format!("Round {round} customer {i}"),
                                phone: "+15550000".into(),
                                email: None,
                            },
                            campaign_id: None,
                        })
                        .await
                }));
            }

            let mut won = 0;
            for task in tasks {
                match task.await.unwrap() {
                    Ok(_) => won += 1,
                    Err(DomainError::SlotConflict { staff_id: 1, .. }) => {}
                    Err(other) => panic!("round {round}: unexpected error: {other}"),
                }
            }
            assert_eq!(won, 1, "round {round}");
        }

        let check = init_database(&config).await.unwrap();
        let active = SeaOrmRepositoryProvider::new(check)
            .bookings()
            .find_active_for_staff_on(1, monday())
            .await
            .unwrap();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                assert!(
                    !a.occupies(&b.interval().unwrap()),
                    "bookings {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }

        let _ = std::fs::remove_file(&path);
    }
}
