//! # Authentication Handlers
//!
//! Signup, login, and logout. Signup derives the role from the email
//! domain once, creates the auth account and its profile, and issues a
//! session. Account and profile creation are two independent writes; if
//! the profile insert fails the freshly created account is removed again
//! before the error is surfaced.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use gators_core::{
    errors::AcademyError,
    models::profile::{Level, Role},
    roles::derive_role,
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub level: Option<Level>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub full_name: String,
}

#[axum::debug_handler]
pub async fn signup(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let mut missing = Vec::new();
    if payload.email.trim().is_empty() {
        missing.push("email");
    }
    if payload.password.is_empty() {
        missing.push("password");
    }
    if payload.full_name.trim().is_empty() {
        missing.push("full_name");
    }
    if !missing.is_empty() {
        return Err(AppError(AcademyError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        ))));
    }

    // Reject duplicate registrations up front
    let existing = gators_db::repositories::auth::get_account_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(AcademyError::Persistence)?;
    if existing.is_some() {
        return Err(AppError(AcademyError::Conflict(
            "email already registered".to_string(),
        )));
    }

    // Role is derived from the email domain exactly once, here
    let role = derive_role(&payload.email);
    let password_hash = auth::hash_password(&payload.password).map_err(AcademyError::Persistence)?;

    // The account id doubles as the profile id
    let user_id = Uuid::new_v4();
    gators_db::repositories::auth::create_account(
        &state.db_pool,
        user_id,
        &payload.email,
        &password_hash,
        role.as_str(),
    )
    .await
    .map_err(AcademyError::Persistence)?;

    let profile_result = gators_db::repositories::profile::create_profile(
        &state.db_pool,
        user_id,
        &payload.full_name,
        &payload.email,
        payload.phone.as_deref(),
        role.as_str(),
        payload.level.map(|level| level.as_str()),
    )
    .await;

    if let Err(profile_err) = profile_result {
        // Compensate: remove the account so the email is not left claimed
        // by a half-created user
        match gators_db::repositories::auth::delete_account(&state.db_pool, user_id).await {
            Ok(_) => return Err(AppError(AcademyError::Persistence(profile_err))),
            Err(cleanup_err) => {
                return Err(AppError(AcademyError::PartialFailure(format!(
                    "account created but profile creation failed ({profile_err}); \
                     account cleanup also failed ({cleanup_err})"
                ))));
            }
        }
    }

    let session = gators_db::repositories::auth::create_session(&state.db_pool, user_id)
        .await
        .map_err(AcademyError::Persistence)?;

    Ok(Json(AuthResponse {
        token: session.token,
        user_id,
        role,
        full_name: payload.full_name,
    }))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let account =
        gators_db::repositories::auth::verify_credentials(&state.db_pool, &payload.email, &payload.password)
            .await
            .map_err(AcademyError::Persistence)?
            .ok_or_else(|| AcademyError::Authentication("invalid credentials".to_string()))?;

    let profile = gators_db::repositories::profile::get_profile_by_id(&state.db_pool, account.id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::Authentication("no profile for this account".to_string()))?;

    let session = gators_db::repositories::auth::create_session(&state.db_pool, account.id)
        .await
        .map_err(AcademyError::Persistence)?;

    let role: Role = profile.role.parse()?;

    Ok(Json(AuthResponse {
        token: session.token,
        user_id: profile.id,
        role,
        full_name: profile.full_name,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = auth::bearer_token(&headers)?;

    gators_db::repositories::auth::delete_session(&state.db_pool, token)
        .await
        .map_err(AcademyError::Persistence)?;

    Ok(StatusCode::NO_CONTENT)
}
