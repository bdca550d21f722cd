use crate::models::{DbAuthAccount, DbSession};
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_account(
    pool: &Pool<Postgres>,
    id: Uuid,
    email: &str,
    password_hash: &str,
    role: &str,
) -> Result<DbAuthAccount> {
    let now = Utc::now();

    tracing::debug!("Creating auth account: id={}, email={}, role={}", id, email, role);

    let account = sqlx::query_as::<_, DbAuthAccount>(
        r#"
        INSERT INTO auth_accounts (id, email, password_hash, role, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, email, password_hash, role, created_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(account)
}

pub async fn get_account_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbAuthAccount>> {
    let account = sqlx::query_as::<_, DbAuthAccount>(
        r#"
        SELECT id, email, password_hash, role, created_at
        FROM auth_accounts
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Checks a credential pair against the stored argon2 hash. Returns the
/// account on success and `None` for an unknown email or a wrong
/// password; the two cases are indistinguishable to the caller.
pub async fn verify_credentials(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> Result<Option<DbAuthAccount>> {
    let Some(account) = get_account_by_email(pool, email).await? else {
        return Ok(None);
    };

    let parsed_hash = argon2::PasswordHash::new(&account.password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid.then_some(account))
}

pub async fn update_account_email(
    pool: &Pool<Postgres>,
    id: Uuid,
    new_email: &str,
) -> Result<DbAuthAccount> {
    tracing::debug!("Updating auth account email: id={}", id);

    let account = sqlx::query_as::<_, DbAuthAccount>(
        r#"
        UPDATE auth_accounts
        SET email = $2
        WHERE id = $1
        RETURNING id, email, password_hash, role, created_at
        "#,
    )
    .bind(id)
    .bind(new_email)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Auth account not found"))?;

    Ok(account)
}

pub async fn delete_account(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting auth account: id={}", id);

    let result = sqlx::query(
        r#"
        DELETE FROM auth_accounts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn create_session(pool: &Pool<Postgres>, account_id: Uuid) -> Result<DbSession> {
    let token = Uuid::new_v4();
    let now = Utc::now();

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (token, account_id, created_at)
        VALUES ($1, $2, $3)
        RETURNING token, account_id, created_at
        "#,
    )
    .bind(token)
    .bind(account_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn get_session(pool: &Pool<Postgres>, token: Uuid) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT token, account_id, created_at
        FROM sessions
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn delete_session(pool: &Pool<Postgres>, token: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE token = $1
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
