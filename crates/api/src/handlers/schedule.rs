//! # Schedule Handlers
//!
//! CRUD over trainer availability blocks. Schedules declare potential
//! availability only; creating a booking never decrements capacity, and
//! overlapping schedules for the same trainer and date may coexist.

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
    models::profile::Role,
    models::schedule::{CreateScheduleRequest, ScheduleView, UpdateScheduleRequest},
    session::{require_capability, Capability, Session},
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct ListSchedulesQuery {
    pub trainer_id: Option<Uuid>,
    /// Case-insensitive substring matched against trainer name, date, and
    /// slot strings
    pub search: Option<String>,
}

fn owns_schedule(session: &Session, trainer_id: Uuid) -> bool {
    session.role == Role::Admin || trainer_id == session.user_id
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(mut payload): Json<CreateScheduleRequest>,
) -> Result<Json<ScheduleView>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    require_capability(&session, Capability::ManageSchedules)?;

    // Trainers declare availability for themselves only
    if session.role == Role::Trainer {
        payload.trainer_id = Some(session.user_id);
    }

    let new_schedule = payload.validate()?;

    let created = gators_db::repositories::schedule::create_schedule(&state.db_pool, &new_schedule)
        .await
        .map_err(AcademyError::Persistence)?
        .into_domain()
        .map_err(AcademyError::Persistence)?;

    Ok(Json(ScheduleView {
        schedule: created,
        trainer_name: None,
    }))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListSchedulesQuery>,
) -> Result<Json<Vec<ScheduleView>>, AppError> {
    auth::authenticate(&state, &headers).await?;

    let rows = gators_db::repositories::schedule::list_schedules(&state.db_pool, query.trainer_id)
        .await
        .map_err(AcademyError::Persistence)?;

    let mut schedules = Vec::with_capacity(rows.len());
    for row in rows {
        let (schedule, trainer_name) = row.into_domain().map_err(AcademyError::Persistence)?;
        schedules.push(ScheduleView {
            schedule,
            trainer_name,
        });
    }

    if let Some(term) = &query.search {
        let needle = term.trim().to_lowercase();
        if !needle.is_empty() {
            schedules.retain(|view| {
                view.trainer_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
                    || view.schedule.date.to_string().contains(&needle)
                    || view
                        .schedule
                        .time_slot
                        .to_vec()
                        .iter()
                        .any(|slot| slot.to_lowercase().contains(&needle))
            });
        }
    }

    Ok(Json(schedules))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleView>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    require_capability(&session, Capability::ManageSchedules)?;

    let schedule = gators_db::repositories::schedule::get_schedule_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Schedule with ID {} not found", id)))?;

    if !owns_schedule(&session, schedule.trainer_id) {
        return Err(AppError(AcademyError::Authorization(
            "may not edit another trainer's schedule".to_string(),
        )));
    }

    if let Some(capacity) = patch.capacity {
        if capacity < 1 {
            return Err(AppError(AcademyError::Validation(
                "capacity must be at least 1".to_string(),
            )));
        }
    }

    let updated = gators_db::repositories::schedule::update_schedule(&state.db_pool, id, &patch)
        .await
        .map_err(AcademyError::Persistence)?
        .into_domain()
        .map_err(AcademyError::Persistence)?;

    Ok(Json(ScheduleView {
        schedule: updated,
        trainer_name: None,
    }))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    require_capability(&session, Capability::ManageSchedules)?;

    let schedule = gators_db::repositories::schedule::get_schedule_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Schedule with ID {} not found", id)))?;

    if !owns_schedule(&session, schedule.trainer_id) {
        return Err(AppError(AcademyError::Authorization(
            "may not delete another trainer's schedule".to_string(),
        )));
    }

    gators_db::repositories::schedule::delete_schedule(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?;

    Ok(StatusCode::NO_CONTENT)
}
