use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::booking_repository::BookingRepository;
use crate::domain::bookings::booking::{Booking, BookingStatus, NewBooking};
use crate::infrastructure::db::PgPool;

const BOOKING_COLUMNS: &str =
    "id, user_id, venue_id, sport, date, start_time, end_time, total_price, status, created_at";

pub struct SqlxBookingRepository {
    pub pool: PgPool,
}

impl SqlxBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, clause: &str, id: Option<Uuid>) -> anyhow::Result<Vec<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings {clause} ORDER BY created_at DESC");
        let mut q = sqlx::query(&sql);
        if let Some(id) = id {
            q = q.bind(id);
        }
        let rows = q.fetch_all(&self.pool).await?;
        rows.iter().map(booking_from_row).collect()
    }
}

fn booking_from_row(r: &PgRow) -> anyhow::Result<Booking> {
    let status: String = r.get("status");
    Ok(Booking {
        id: r.get("id"),
        user_id: r.get("user_id"),
        venue_id: r.get("venue_id"),
        sport: r.get("sport"),
        date: r.get("date"),
        start_time: r.get("start_time"),
        end_time: r.get("end_time"),
        total_price: r.get("total_price"),
        status: status.parse()?,
        created_at: r.get("created_at"),
    })
}

#[async_trait]
impl BookingRepository for SqlxBookingRepository {
    async fn create_if_slot_free(&self, booking: &NewBooking) -> anyhow::Result<Option<Booking>> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent bookings of the same venue until commit
        sqlx::query("SELECT id FROM venues WHERE id = $1 FOR UPDATE")
            .bind(booking.venue_id)
            .fetch_optional(&mut *tx)
            .await?;

        let clash: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (
                   SELECT 1 FROM bookings
                   WHERE venue_id = $1 AND date = $2 AND lower(sport) = lower($3)
                     AND status = 'confirmed'
                     AND start_time < $5 AND end_time > $4)"#,
        )
        .bind(booking.venue_id)
        .bind(booking.date)
        .bind(&booking.sport)
        .bind(booking.slot.start)
        .bind(booking.slot.end)
        .fetch_one(&mut *tx)
        .await?;
        if clash {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query(&format!(
            r#"INSERT INTO bookings (user_id, venue_id, sport, date, start_time, end_time, total_price)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {BOOKING_COLUMNS}"#
        ))
        .bind(booking.user_id)
        .bind(booking.venue_id)
        .bind(&booking.sport)
        .bind(booking.date)
        .bind(booking.slot.start)
        .bind(booking.slot.end)
        .bind(booking.total_price)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        booking_from_row(&row).map(Some)
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Booking>> {
        let row = sqlx::query(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(booking_from_row).transpose()
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Booking>> {
        self.list_where("WHERE user_id = $1", Some(user_id)).await
    }

    async fn list_for_venue(&self, venue_id: Uuid) -> anyhow::Result<Vec<Booking>> {
        self.list_where("WHERE venue_id = $1", Some(venue_id)).await
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Booking>> {
        self.list_where("", None).await
    }

    async fn set_status(&self, id: Uuid, status: BookingStatus) -> anyhow::Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(booking_from_row).transpose()
    }
}
