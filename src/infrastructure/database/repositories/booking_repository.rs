//! SeaORM implementation of BookingLedger
//!
//! `insert_exclusive` runs the overlap check and the insert inside one
//! database transaction. A dropped future drops the transaction, which
//! rolls it back.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, warn};

use super::{corrupt, db_err};
use crate::domain::booking::{Booking, BookingLedger, BookingStatus, CustomerInfo, NewBooking};
use crate::domain::calendar::TimeOfDay;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, booking_service};

pub struct SeaOrmBookingLedger {
    db: DatabaseConnection,
}

impl SeaOrmBookingLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model, service_ids: Vec<i32>) -> DomainResult<Booking> {
    let start = u16::try_from(m.start_minute)
        .ok()
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| corrupt("bookings", m.id, format!("start minute {}", m.start_minute)))?;
    let duration_minutes = u32::try_from(m.end_minute - m.start_minute)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| {
            corrupt(
                "bookings",
                m.id,
                format!("interval {}..{}", m.start_minute, m.end_minute),
            )
        })?;
    let total_price = Decimal::from_str(&m.total_price)
        .map_err(|e| corrupt("bookings", m.id, format!("price '{}': {}", m.total_price, e)))?;
    let status = BookingStatus::from_str(&m.status).map_err(|e| corrupt("bookings", m.id, e))?;

    Ok(Booking {
        id: m.id,
        place_id: m.place_id,
        service_ids,
        staff_id: m.staff_id,
        date: m.booking_date,
        start,
        duration_minutes,
        total_price,
        status,
        customer: CustomerInfo {
            name: m.customer_name,
            phone: m.customer_phone,
            email: m.customer_email,
        },
        campaign_id: m.campaign_id,
        created_at: m.created_at,
    })
}

/// Service ids of each booking, in performance order
async fn load_services<C: ConnectionTrait>(
    conn: &C,
    booking_ids: &[i64],
) -> DomainResult<HashMap<i64, Vec<i32>>> {
    let mut by_booking: HashMap<i64, Vec<i32>> = HashMap::new();
    if booking_ids.is_empty() {
        return Ok(by_booking);
    }
    let rows = booking_service::Entity::find()
        .filter(booking_service::Column::BookingId.is_in(booking_ids.iter().copied()))
        .order_by_asc(booking_service::Column::BookingId)
        .order_by_asc(booking_service::Column::Position)
        .all(conn)
        .await
        .map_err(db_err)?;
    for row in rows {
        by_booking.entry(row.booking_id).or_default().push(row.service_id);
    }
    Ok(by_booking)
}

async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<booking::Model>,
) -> DomainResult<Vec<Booking>> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut services = load_services(conn, &ids).await?;
    models
        .into_iter()
        .map(|m| {
            let service_ids = services.remove(&m.id).unwrap_or_default();
            model_to_domain(m, service_ids)
        })
        .collect()
}

/// SQLite reports a writer that could not get the database lock within
/// the busy timeout as `SQLITE_BUSY` (5) or `SQLITE_LOCKED` (6)
fn is_lock_contention(e: &DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("database is locked")
        || msg.contains("database table is locked")
        || msg.contains("(code: 5)")
        || msg.contains("(code: 6)")
}

// ── BookingLedger impl ──────────────────────────────────────────

#[async_trait]
impl BookingLedger for SeaOrmBookingLedger {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(model) => Ok(hydrate(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_active_for_staff_on(
        &self,
        staff_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::StaffId.eq(staff_id))
            .filter(booking::Column::BookingDate.eq(date))
            .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .order_by_asc(booking::Column::StartMinute)
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        hydrate(&self.db, models).await
    }

    async fn find_for_place_on(
        &self,
        place_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::PlaceId.eq(place_id))
            .filter(booking::Column::BookingDate.eq(date))
            .order_by_asc(booking::Column::StaffId)
            .order_by_asc(booking::Column::StartMinute)
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        hydrate(&self.db, models).await
    }

    async fn insert_exclusive(&self, new: NewBooking) -> DomainResult<Booking> {
        let interval = new.interval().ok_or_else(|| {
            DomainError::InvalidDuration(format!(
                "{} minutes from {} does not fit the day",
                new.duration_minutes, new.start
            ))
        })?;
        let start = i32::from(interval.start().minutes());
        let end = i32::from(interval.end().minutes());
        let contended = |e: DbErr| {
            if is_lock_contention(&e) {
                warn!(staff_id = new.staff_id, error = %e, "Ledger write lost a lock race");
                DomainError::SlotConflict {
                    staff_id: new.staff_id,
                    date: new.date,
                    start: new.start,
                }
            } else {
                db_err(e)
            }
        };

        let txn = self.db.begin().await.map_err(contended)?;

        // Write first: the insert takes the database write lock, so a
        // competing writer waits here and then sees this row in its
        // overlap check.
        let created_at = Utc::now();
        let inserted = booking::ActiveModel {
            id: NotSet,
            place_id: Set(new.place_id),
            staff_id: Set(new.staff_id),
            booking_date: Set(new.date),
            start_minute: Set(start),
            end_minute: Set(end),
            total_price: Set(new.total_price.to_string()),
            status: Set(new.status.as_str().to_string()),
            customer_name: Set(new.customer.name.clone()),
            customer_phone: Set(new.customer.phone.clone()),
            customer_email: Set(new.customer.email.clone()),
            campaign_id: Set(new.campaign_id),
            created_at: Set(created_at),
        }
        .insert(&txn)
        .await
        .map_err(contended)?;

        let clash = booking::Entity::find()
            .filter(booking::Column::Id.ne(inserted.id))
            .filter(booking::Column::StaffId.eq(new.staff_id))
            .filter(booking::Column::BookingDate.eq(new.date))
            .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .filter(booking::Column::StartMinute.lt(end))
            .filter(booking::Column::EndMinute.gt(start))
            .one(&txn)
            .await
            .map_err(contended)?;
        if let Some(existing) = clash {
            txn.rollback().await.map_err(db_err)?;
            debug!(
                staff_id = new.staff_id,
                existing_id = existing.id,
                "Overlap found inside ledger transaction"
            );
            return Err(DomainError::SlotConflict {
                staff_id: new.staff_id,
                date: new.date,
                start: new.start,
            });
        }

        if !new.service_ids.is_empty() {
            let links = new
                .service_ids
                .iter()
                .enumerate()
                .map(|(position, service_id)| booking_service::ActiveModel {
                    booking_id: Set(inserted.id),
                    position: Set(position as i32),
                    service_id: Set(*service_id),
                });
            booking_service::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(contended)?;
        }

        txn.commit().await.map_err(contended)?;
        Ok(new.into_booking(inserted.id, created_at))
    }

    async fn update_status(
        &self,
        id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<bool> {
        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(to.as_str()))
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected > 0 {
            return Ok(true);
        }

        let exists = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if exists {
            Ok(false)
        } else {
            Err(DomainError::not_found("Booking", id))
        }
    }
}
