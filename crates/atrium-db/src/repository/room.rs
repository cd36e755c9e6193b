//! # Room Repository
//!
//! Rooms and guest bookings. Check-in and checkout are the two
//! multi-statement sequences here; both commit atomically so a room's
//! status can never drift from its booking.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::new_id;
use atrium_core::{Booking, BookingStatus, Room, RoomOverview, RoomStatus};

/// Repository for room and booking database operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        RoomRepository { pool }
    }

    /// All rooms with the active guest's name where occupied.
    pub async fn list_overview(&self) -> DbResult<Vec<RoomOverview>> {
        let rooms: Vec<RoomOverview> = sqlx::query_as(
            r#"
            SELECT
                r.room_number,
                r.room_type,
                r.nightly_rate_cents,
                r.status,
                b.guest_name
            FROM rooms r
            LEFT JOIN bookings b
                ON r.room_number = b.room_number AND b.status = 'ACTIVE'
            ORDER BY r.room_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    pub async fn get(&self, room_number: &str) -> DbResult<Option<Room>> {
        let room: Option<Room> = sqlx::query_as(
            "SELECT room_number, room_type, nightly_rate_cents, status \
             FROM rooms WHERE room_number = ?1",
        )
        .bind(room_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Adds a room. A duplicate number surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn add(
        &self,
        room_number: &str,
        room_type: &str,
        nightly_rate_cents: i64,
    ) -> DbResult<Room> {
        debug!(room_number, room_type, "inserting room");

        sqlx::query(
            "INSERT INTO rooms (room_number, room_type, nightly_rate_cents, status) \
             VALUES (?1, ?2, ?3, 'AVAILABLE')",
        )
        .bind(room_number)
        .bind(room_type)
        .bind(nightly_rate_cents)
        .execute(&self.pool)
        .await?;

        Ok(Room {
            room_number: room_number.to_string(),
            room_type: room_type.to_string(),
            nightly_rate_cents,
            status: RoomStatus::Available,
        })
    }

    pub async fn delete(&self, room_number: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE room_number = ?1")
            .bind(room_number)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Room", room_number));
        }
        Ok(())
    }

    /// Checks a guest in: creates the ACTIVE booking and flips the room to
    /// OCCUPIED, atomically. Fails when the room is missing or already
    /// occupied.
    pub async fn check_in(
        &self,
        room_number: &str,
        guest_name: &str,
        guest_phone: &str,
    ) -> DbResult<Booking> {
        let mut tx = self.pool.begin().await?;

        // Guarded flip: only an AVAILABLE room can take a guest
        let flipped = sqlx::query(
            "UPDATE rooms SET status = 'OCCUPIED' \
             WHERE room_number = ?1 AND status = 'AVAILABLE'",
        )
        .bind(room_number)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if flipped == 0 {
            return Err(DbError::not_found("Available room", room_number));
        }

        let booking = Booking {
            id: new_id(),
            room_number: room_number.to_string(),
            guest_name: guest_name.to_string(),
            guest_phone: guest_phone.to_string(),
            checked_in_at: Utc::now(),
            checked_out_at: None,
            status: BookingStatus::Active,
        };

        sqlx::query(
            r#"
            INSERT INTO bookings (id, room_number, guest_name, guest_phone,
                                  checked_in_at, status)
            VALUES (?1, ?2, ?3, ?4, ?5, 'ACTIVE')
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.room_number)
        .bind(&booking.guest_name)
        .bind(&booking.guest_phone)
        .bind(booking.checked_in_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(room_number, guest = %booking.guest_name, "guest checked in");
        Ok(booking)
    }

    /// The room's ACTIVE booking, if any (most recent when history is
    /// inconsistent).
    pub async fn active_booking(&self, room_number: &str) -> DbResult<Option<Booking>> {
        let booking: Option<Booking> = sqlx::query_as(
            r#"
            SELECT id, room_number, guest_name, guest_phone,
                   checked_in_at, checked_out_at, status
            FROM bookings
            WHERE room_number = ?1 AND status = 'ACTIVE'
            ORDER BY checked_in_at DESC
            LIMIT 1
            "#,
        )
        .bind(room_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Checks the guest out: stamps and closes the ACTIVE booking and frees
    /// the room, atomically. Returns the closed booking.
    pub async fn check_out(&self, room_number: &str) -> DbResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let booking: Option<Booking> = sqlx::query_as(
            r#"
            SELECT id, room_number, guest_name, guest_phone,
                   checked_in_at, checked_out_at, status
            FROM bookings
            WHERE room_number = ?1 AND status = 'ACTIVE'
            ORDER BY checked_in_at DESC
            LIMIT 1
            "#,
        )
        .bind(room_number)
        .fetch_optional(&mut *tx)
        .await?;

        let mut booking =
            booking.ok_or_else(|| DbError::not_found("Active booking", room_number))?;

        let now = Utc::now();
        sqlx::query(
            "UPDATE bookings SET status = 'CHECKED_OUT', checked_out_at = ?2 WHERE id = ?1",
        )
        .bind(&booking.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE rooms SET status = 'AVAILABLE' WHERE room_number = ?1")
            .bind(room_number)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        booking.checked_out_at = Some(now);
        booking.status = BookingStatus::CheckedOut;

        debug!(room_number, guest = %booking.guest_name, "guest checked out");
        Ok(booking)
    }

    /// Room revenue for one business date: nightly rates of the bookings
    /// that checked in that day.
    pub async fn daily_rooms_total(&self, date: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(r.nightly_rate_cents), 0)
            FROM bookings b
            JOIN rooms r ON b.room_number = r.room_number
            WHERE substr(b.checked_in_at, 1, 10) = ?1
            "#,
        )
        .bind(date.to_string())
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

    #[tokio::test]
    async fn check_in_flips_room_and_shows_guest() {
        let db = test_db().await;
        let rooms = db.rooms();

        rooms.add("101", "Double", 250000).await.unwrap();
        rooms.check_in("101", "Meera Nair", "9000090000").await.unwrap();

        let overview = rooms.list_overview().await.unwrap();
        assert_eq!(overview[0].status, RoomStatus::Occupied);
        assert_eq!(overview[0].guest_name.as_deref(), Some("Meera Nair"));

        // Occupied room rejects a second check-in
        assert!(matches!(
            rooms.check_in("101", "Anyone Else", "1").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn check_out_closes_booking_and_frees_room() {
        let db = test_db().await;
        let rooms = db.rooms();

        rooms.add("101", "Double", 250000).await.unwrap();
        rooms.check_in("101", "Meera Nair", "9000090000").await.unwrap();

        let booking = rooms.check_out("101").await.unwrap();
        assert_eq!(booking.status, BookingStatus::CheckedOut);
        assert!(booking.checked_out_at.is_some());

        let room = rooms.get("101").await.unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert!(rooms.active_booking("101").await.unwrap().is_none());

        // No active booking left to check out
        assert!(matches!(
            rooms.check_out("101").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn daily_rooms_total_counts_todays_check_ins() {
        let db = test_db().await;
        let rooms = db.rooms();

        rooms.add("101", "Double", 250000).await.unwrap();
        rooms.add("102", "Single", 150000).await.unwrap();
        rooms.check_in("101", "Meera Nair", "9000090000").await.unwrap();

        let today = Utc::now().date_naive();
        assert_eq!(rooms.daily_rooms_total(today).await.unwrap(), 250000);
    }
}
