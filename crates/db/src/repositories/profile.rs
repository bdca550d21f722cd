use crate::models::DbProfile;
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    full_name: &str,
    email: &str,
    phone: Option<&str>,
    role: &str,
    level: Option<&str>,
) -> Result<DbProfile> {
    let now = Utc::now();

    tracing::debug!("Creating profile: id={}, email={}, role={}", id, email, role);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        INSERT INTO profiles (id, full_name, email, phone, role, level, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING id, full_name, email, phone, role, level, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(level)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProfile>> {
    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, full_name, email, phone, role, level, created_at, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbProfile>> {
    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, full_name, email, phone, role, level, created_at, updated_at
        FROM profiles
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Lists profiles, optionally narrowed to one role, ordered by name.
pub async fn list_profiles(pool: &Pool<Postgres>, role: Option<&str>) -> Result<Vec<DbProfile>> {
    let profiles = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, full_name, email, phone, role, level, created_at, updated_at
        FROM profiles
        WHERE ($1::varchar IS NULL OR role = $1)
        ORDER BY full_name ASC
        "#,
    )
    .bind(role)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

pub async fn update_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    full_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    level: Option<&str>,
) -> Result<DbProfile> {
    let profile = get_profile_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Profile not found"))?;

    let full_name = full_name.unwrap_or(&profile.full_name);
    let email = email.unwrap_or(&profile.email);
    let phone = phone.or(profile.phone.as_deref());
    let level = level.or(profile.level.as_deref());

    let updated_profile = sqlx::query_as::<_, DbProfile>(
        r#"
        UPDATE profiles
        SET full_name = $2, email = $3, phone = $4, level = $5, updated_at = $6
        WHERE id = $1
        RETURNING id, full_name, email, phone, role, level, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(email)
    .bind(phone)
    .bind(level)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated_profile)
}

pub async fn delete_profile(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting profile: id={}", id);

    let result = sqlx::query(
        r#"
        DELETE FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Re-inserts a previously deleted profile row, preserving its original
/// id and timestamps. Used as the compensating step of the delete saga.
pub async fn restore_profile(pool: &Pool<Postgres>, profile: &DbProfile) -> Result<DbProfile> {
    tracing::debug!("Restoring profile: id={}", profile.id);

    let restored = sqlx::query_as::<_, DbProfile>(
        r#"
        INSERT INTO profiles (id, full_name, email, phone, role, level, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, full_name, email, phone, role, level, created_at, updated_at
        "#,
    )
    .bind(profile.id)
    .bind(&profile.full_name)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.role)
    .bind(&profile.level)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .fetch_one(pool)
    .await?;

    Ok(restored)
}
