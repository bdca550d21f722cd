use crate::models::DbBooking;
use chrono::{NaiveDate, Utc};
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use gators_core::models::booking::{NewBooking, UpdateBookingRequest};

/// Equality filters for booking selects. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub student_id: Option<Uuid>,
    pub trainer_id: Option<Uuid>,
    pub day: Option<NaiveDate>,
    pub status: Option<String>,
}

pub async fn create_booking(pool: &Pool<Postgres>, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, student_id={}, trainer_id={}, day={}, time={}",
        id,
        booking.student_id,
        booking.trainer_id,
        booking.day,
        booking.time
    );

    let created = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, student_id, trainer_id, day, time, status, level, student_name, trainer_name, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, student_id, trainer_id, day, time, status, attendance, level, student_name, trainer_name, created_at
        "#,
    )
    .bind(id)
    .bind(booking.student_id)
    .bind(booking.trainer_id)
    .bind(booking.day)
    .bind(&booking.time)
    .bind(booking.status.as_str())
    .bind(booking.level.map(|level| level.as_str()))
    .bind(&booking.student_name)
    .bind(&booking.trainer_name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, student_id, trainer_id, day, time, status, attendance, level, student_name, trainer_name, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Selects bookings with profile display names embedded: the live joined
/// profile name when the profile still exists, the stored snapshot
/// otherwise.
pub async fn list_bookings(pool: &Pool<Postgres>, filter: &BookingFilter) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT b.id, b.student_id, b.trainer_id, b.day, b.time, b.status, b.attendance, b.level,
               COALESCE(sp.full_name, b.student_name) AS student_name,
               COALESCE(tp.full_name, b.trainer_name) AS trainer_name,
               b.created_at
        FROM bookings b
        LEFT JOIN profiles sp ON sp.id = b.student_id
        LEFT JOIN profiles tp ON tp.id = b.trainer_id
        WHERE ($1::uuid IS NULL OR b.student_id = $1)
          AND ($2::uuid IS NULL OR b.trainer_id = $2)
          AND ($3::date IS NULL OR b.day = $3)
          AND ($4::varchar IS NULL OR b.status = $4)
        ORDER BY b.created_at ASC
        "#,
    )
    .bind(filter.student_id)
    .bind(filter.trainer_id)
    .bind(filter.day)
    .bind(filter.status.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn update_booking(
    pool: &Pool<Postgres>,
    id: Uuid,
    patch: &UpdateBookingRequest,
) -> Result<DbBooking> {
    let booking = get_booking_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Booking not found"))?;

    let student_id = patch.student_id.unwrap_or(booking.student_id);
    let trainer_id = patch.trainer_id.unwrap_or(booking.trainer_id);
    let day = patch.day.unwrap_or(booking.day);
    let time = patch.time.as_deref().unwrap_or(&booking.time);
    let status = patch
        .status
        .map(|status| status.as_str().to_string())
        .unwrap_or(booking.status);

    let updated = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET student_id = $2, trainer_id = $3, day = $4, time = $5, status = $6
        WHERE id = $1
        RETURNING id, student_id, trainer_id, day, time, status, attendance, level, student_name, trainer_name, created_at
        "#,
    )
    .bind(id)
    .bind(student_id)
    .bind(trainer_id)
    .bind(day)
    .bind(time)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Writes the attendance column alone; `None` clears it. Status is left
/// untouched.
pub async fn set_attendance(
    pool: &Pool<Postgres>,
    id: Uuid,
    attendance: Option<&str>,
) -> Result<DbBooking> {
    tracing::debug!("Setting attendance: id={}, attendance={:?}", id, attendance);

    let updated = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET attendance = $2
        WHERE id = $1
        RETURNING id, student_id, trainer_id, day, time, status, attendance, level, student_name, trainer_name, created_at
        "#,
    )
    .bind(id)
    .bind(attendance)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Booking not found"))?;

    Ok(updated)
}

pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting booking: id={}", id);

    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// How many bookings already occupy a trainer's slot. Feeds the optional
/// slot-conflict policy; the default policy never consults it.
pub async fn count_bookings_for_slot(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
    day: NaiveDate,
    time: &str,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM bookings
        WHERE trainer_id = $1 AND day = $2 AND time = $3
        "#,
    )
    .bind(trainer_id)
    .bind(day)
    .bind(time)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
