//! # Authentication Module
//!
//! Password hashing and per-request session resolution.
//!
//! Passwords are hashed with Argon2 before storage. Sessions are opaque
//! bearer tokens issued at login; every protected handler resolves the
//! token into an explicit [`Session`] value and passes it to the
//! capability checks — nothing is held in process-wide state.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::http::{header, HeaderMap};
use eyre::Result;
use std::str::FromStr;
use uuid::Uuid;

use gators_core::errors::AcademyError;
use gators_core::models::profile::Role;
use gators_core::session::Session;

use crate::ApiState;

/// Hashes a password using the Argon2 algorithm with a fresh random
/// salt, returning the PHC string form for storage.
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Extracts the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<Uuid, AcademyError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AcademyError::Authentication("missing authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AcademyError::Authentication("malformed authorization header".to_string()))?;

    Uuid::parse_str(token.trim())
        .map_err(|_| AcademyError::Authentication("malformed session token".to_string()))
}

/// Resolves the request's bearer token into a session context.
///
/// Looks up the session row, then the profile it points at, and returns
/// both as a [`Session`] value. Fails with an authentication error when
/// the token is unknown (logged out or never issued) or the profile has
/// been removed since login.
pub async fn authenticate(state: &ApiState, headers: &HeaderMap) -> Result<Session, AcademyError> {
    let token = bearer_token(headers)?;

    let session_row = gators_db::repositories::auth::get_session(&state.db_pool, token)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::Authentication("invalid or expired session".to_string()))?;

    let profile = gators_db::repositories::profile::get_profile_by_id(
        &state.db_pool,
        session_row.account_id,
    )
    .await
    .map_err(AcademyError::Persistence)?
    .ok_or_else(|| AcademyError::Authentication("no profile for this session".to_string()))?;

    Ok(Session {
        user_id: profile.id,
        email: profile.email,
        full_name: profile.full_name,
        role: Role::from_str(&profile.role)?,
    })
}
