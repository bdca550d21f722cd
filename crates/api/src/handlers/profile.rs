//! # Profile Handlers
//!
//! Listing and editing person records, plus the admin-only removal that
//! also deletes the auth account. The removal is a two-step saga: the
//! profile row goes first, then the account; if the account delete fails
//! the profile row is re-inserted and the combined outcome is surfaced.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use gators_core::{
    errors::AcademyError,
    models::profile::{Profile, Role, UpdateProfileRequest},
    session::{require_capability, Capability},
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct ListProfilesQuery {
    pub role: Option<Role>,
}

#[axum::debug_handler]
pub async fn list_profiles(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    // The trainer directory is public to any signed-in user (the booking
    // form needs it); every other listing is staff-only
    if query.role != Some(Role::Trainer) && session.role == Role::Trainee {
        return Err(AppError(AcademyError::Authorization(
            "trainees may only list trainers".to_string(),
        )));
    }

    let rows = gators_db::repositories::profile::list_profiles(
        &state.db_pool,
        query.role.map(|role| role.as_str()),
    )
    .await
    .map_err(AcademyError::Persistence)?;

    let profiles = rows
        .into_iter()
        .map(|row| row.into_domain())
        .collect::<eyre::Result<Vec<Profile>>>()
        .map_err(AcademyError::Persistence)?;

    Ok(Json(profiles))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    if session.user_id != id {
        require_capability(&session, Capability::ManageProfiles)?;
    }

    let profile = gators_db::repositories::profile::get_profile_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Profile with ID {} not found", id)))?
        .into_domain()
        .map_err(AcademyError::Persistence)?;

    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    if session.user_id != id {
        require_capability(&session, Capability::ManageProfiles)?;
    }

    // Email changes touch the auth account too; only admins may do that
    if patch.email.is_some() {
        require_capability(&session, Capability::ManageProfiles)?;
    }

    let updated = gators_db::repositories::profile::update_profile(
        &state.db_pool,
        id,
        patch.full_name.as_deref(),
        patch.email.as_deref(),
        patch.phone.as_deref(),
        patch.level.map(|level| level.as_str()),
    )
    .await
    .map_err(AcademyError::Persistence)?;

    // Keep the auth account's email in step with the profile
    if let Some(new_email) = &patch.email {
        gators_db::repositories::auth::update_account_email(&state.db_pool, id, new_email)
            .await
            .map_err(AcademyError::Persistence)?;
    }

    Ok(Json(updated.into_domain().map_err(AcademyError::Persistence)?))
}

/// Admin removal of a person: profile row and auth account.
///
/// The two deletes are independent writes with no transaction around
/// them. The profile row goes first; if the account delete then fails,
/// the saved row is re-inserted so the user is not left half-removed.
/// When even that compensation fails, the handler reports a partial
/// failure naming both errors.
#[axum::debug_handler]
pub async fn delete_profile(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    require_capability(&session, Capability::ManageProfiles)?;

    let profile = gators_db::repositories::profile::get_profile_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Profile with ID {} not found", id)))?;

    gators_db::repositories::profile::delete_profile(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?;

    if let Err(auth_err) = gators_db::repositories::auth::delete_account(&state.db_pool, id).await {
        // Compensate: put the profile row back
        match gators_db::repositories::profile::restore_profile(&state.db_pool, &profile).await {
            Ok(_) => return Err(AppError(AcademyError::Persistence(auth_err))),
            Err(restore_err) => {
                return Err(AppError(AcademyError::PartialFailure(format!(
                    "profile deleted but auth account removal failed ({auth_err}); \
                     profile restore also failed ({restore_err})"
                ))));
            }
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
