use crate::models::{DbSchedule, DbScheduleWithTrainer};
use chrono::{NaiveDate, Utc};
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use gators_core::models::schedule::{NewSchedule, UpdateScheduleRequest};

pub async fn create_schedule(pool: &Pool<Postgres>, schedule: &NewSchedule) -> Result<DbSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let time_slot = serde_json::to_value(&schedule.time_slot)?;

    tracing::debug!(
        "Creating schedule: id={}, trainer_id={}, date={}",
        id,
        schedule.trainer_id,
        schedule.date
    );

    let created = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (id, trainer_id, date, time_slot, capacity, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, trainer_id, date, time_slot, capacity, status, created_at
        "#,
    )
    .bind(id)
    .bind(schedule.trainer_id)
    .bind(schedule.date)
    .bind(time_slot)
    .bind(schedule.capacity)
    .bind(schedule.status.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_schedule_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSchedule>> {
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, trainer_id, date, time_slot, capacity, status, created_at
        FROM schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

/// Lists schedules with the owning trainer's display name embedded,
/// optionally narrowed to one trainer.
pub async fn list_schedules(
    pool: &Pool<Postgres>,
    trainer_id: Option<Uuid>,
) -> Result<Vec<DbScheduleWithTrainer>> {
    let schedules = sqlx::query_as::<_, DbScheduleWithTrainer>(
        r#"
        SELECT s.id, s.trainer_id, s.date, s.time_slot, s.capacity, s.status, s.created_at,
               p.full_name AS trainer_name
        FROM schedules s
        LEFT JOIN profiles p ON p.id = s.trainer_id
        WHERE ($1::uuid IS NULL OR s.trainer_id = $1)
        ORDER BY s.date ASC, s.created_at ASC
        "#,
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

/// Active schedules for one trainer on one date; the availability lookup
/// the booking form drives.
pub async fn list_active_for_trainer_date(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, trainer_id, date, time_slot, capacity, status, created_at
        FROM schedules
        WHERE trainer_id = $1 AND date = $2 AND status = 'active'
        ORDER BY created_at ASC
        "#,
    )
    .bind(trainer_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn update_schedule(
    pool: &Pool<Postgres>,
    id: Uuid,
    patch: &UpdateScheduleRequest,
) -> Result<DbSchedule> {
    let schedule = get_schedule_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Schedule not found"))?;

    let trainer_id = patch.trainer_id.unwrap_or(schedule.trainer_id);
    let date = patch.date.unwrap_or(schedule.date);
    let time_slot = match &patch.time_slot {
        Some(slots) => serde_json::to_value(slots)?,
        None => schedule.time_slot,
    };
    let capacity = patch.capacity.unwrap_or(schedule.capacity);
    let status = patch
        .status
        .map(|status| status.as_str().to_string())
        .unwrap_or(schedule.status);

    let updated = sqlx::query_as::<_, DbSchedule>(
        r#"
        UPDATE schedules
        SET trainer_id = $2, date = $3, time_slot = $4, capacity = $5, status = $6
        WHERE id = $1
        RETURNING id, trainer_id, date, time_slot, capacity, status, created_at
        "#,
    )
    .bind(id)
    .bind(trainer_id)
    .bind(date)
    .bind(time_slot)
    .bind(capacity)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_schedule(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting schedule: id={}", id);

    let result = sqlx::query(
        r#"
        DELETE FROM schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_active_schedules(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM schedules
        WHERE status = 'active'
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
