//! # Hall Repository
//!
//! Banquet halls and event bookings. The one-confirmed-booking-per
//! (hall, date) rule is enforced by a partial unique index, so a conflict
//! is a constraint violation even if two writers race the pre-check.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::new_id;
use atrium_core::{Hall, HallBooking, HallBookingStatus};
use chrono::NaiveDate;

/// One upcoming event with its hall name, for the bookings board.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HallBookingRecord {
    pub id: String,
    pub hall_name: String,
    pub client_name: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub total_cents: i64,
}

/// Repository for hall and event-booking database operations.
#[derive(Debug, Clone)]
pub struct HallRepository {
    pool: SqlitePool,
}

impl HallRepository {
    pub fn new(pool: SqlitePool) -> Self {
        HallRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Hall>> {
        let halls: Vec<Hall> =
            sqlx::query_as("SELECT id, name, capacity, day_rate_cents FROM halls ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(halls)
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<Hall>> {
        let hall: Option<Hall> =
            sqlx::query_as("SELECT id, name, capacity, day_rate_cents FROM halls WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(hall)
    }

    /// Adds a hall. A duplicate name surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn add(&self, name: &str, capacity: i64, day_rate_cents: i64) -> DbResult<Hall> {
        let hall = Hall {
            id: new_id(),
            name: name.to_string(),
            capacity,
            day_rate_cents,
        };

        debug!(name = %hall.name, capacity, "inserting hall");

        sqlx::query("INSERT INTO halls (id, name, capacity, day_rate_cents) VALUES (?1, ?2, ?3, ?4)")
            .bind(&hall.id)
            .bind(&hall.name)
            .bind(hall.capacity)
            .bind(hall.day_rate_cents)
            .execute(&self.pool)
            .await?;

        Ok(hall)
    }

    /// Books a hall for a date. A confirmed booking already holding that
    /// (hall, date) pair makes this a [`DbError::UniqueViolation`].
    #[allow(clippy::too_many_arguments)]
    pub async fn book(
        &self,
        hall_id: &str,
        client_name: &str,
        client_phone: &str,
        event_date: NaiveDate,
        event_type: &str,
        services: &str,
        total_cents: i64,
    ) -> DbResult<HallBooking> {
        let booking = HallBooking {
            id: new_id(),
            hall_id: hall_id.to_string(),
            client_name: client_name.to_string(),
            client_phone: client_phone.to_string(),
            event_date,
            event_type: event_type.to_string(),
            services: services.to_string(),
            total_cents,
            status: HallBookingStatus::Confirmed,
        };

        debug!(hall_id, %event_date, client = %booking.client_name, "booking hall");

        sqlx::query(
            r#"
            INSERT INTO hall_bookings (id, hall_id, client_name, client_phone,
                                       event_date, event_type, services,
                                       total_cents, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'CONFIRMED')
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.hall_id)
        .bind(&booking.client_name)
        .bind(&booking.client_phone)
        .bind(booking.event_date)
        .bind(&booking.event_type)
        .bind(&booking.services)
        .bind(booking.total_cents)
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Cancels a booking, freeing its (hall, date) slot.
    pub async fn cancel(&self, booking_id: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE hall_bookings SET status = 'CANCELLED' \
             WHERE id = ?1 AND status = 'CONFIRMED'",
        )
        .bind(booking_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Hall booking", booking_id));
        }
        Ok(())
    }

    /// Confirmed bookings with their hall names, newest event first.
    pub async fn upcoming(&self) -> DbResult<Vec<HallBookingRecord>> {
        let records: Vec<HallBookingRecord> = sqlx::query_as(
            r#"
            SELECT b.id, h.name AS hall_name, b.client_name,
                   b.event_date, b.event_type, b.total_cents
            FROM hall_bookings b
            JOIN halls h ON b.hall_id = h.id
            WHERE b.status = 'CONFIRMED'
            ORDER BY b.event_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Hall revenue for events on one date.
    pub async fn daily_halls_total(&self, date: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_cents), 0) FROM hall_bookings \
             WHERE event_date = ?1 AND status = 'CONFIRMED'",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn same_hall_and_date_books_once() {
        let db = test_db().await;
        let halls = db.halls();

        let hall = halls.add("Grand Ballroom", 500, 2000000).await.unwrap();

        halls
            .book(&hall.id, "Kiran", "9", june_first(), "Wedding", "DJ", 2500000)
            .await
            .unwrap();

        let err = halls
            .book(&hall.id, "Ravi", "8", june_first(), "Birthday", "", 2000000)
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());

        // A different date for the same hall is fine
        let next_day = june_first().succ_opt().unwrap();
        halls
            .book(&hall.id, "Ravi", "8", next_day, "Birthday", "", 2000000)
            .await
            .unwrap();

        assert_eq!(halls.upcoming().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cancellation_frees_the_slot() {
        let db = test_db().await;
        let halls = db.halls();

        let hall = halls.add("Poolside Area", 100, 1000000).await.unwrap();
        let booking = halls
            .book(&hall.id, "Kiran", "9", june_first(), "Party", "", 1000000)
            .await
            .unwrap();

        halls.cancel(&booking.id).await.unwrap();

        // Slot is bookable again
        halls
            .book(&hall.id, "Ravi", "8", june_first(), "Conference", "", 1000000)
            .await
            .unwrap();

        assert_eq!(halls.upcoming().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn daily_halls_total_counts_confirmed_events() {
        let db = test_db().await;
        let halls = db.halls();

        let hall = halls.add("Conference Hall", 50, 500000).await.unwrap();
        halls
            .book(&hall.id, "Kiran", "9", june_first(), "Conference", "", 700000)
            .await
            .unwrap();

        assert_eq!(halls.daily_halls_total(june_first()).await.unwrap(), 700000);
        let other = NaiveDate::from_ymd_opt(2026, 6, 2).unwrap();
        assert_eq!(halls.daily_halls_total(other).await.unwrap(), 0);
    }
}
