//! # Availability Handlers
//!
//! Answers the booking form's question: which time slots does a trainer
//! offer on a date? Active schedules matching (trainer, date) are
//! fetched and their `time_slot` values flattened into one list, in
//! stored order, duplicates included. An empty answer keeps the form's
//! time picker disabled.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use gators_core::{availability::available_times, errors::AcademyError};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Query parameters for the availability endpoint.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?trainer_id=uuid&date=2026-08-05
/// ```
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub trainer_id: Uuid,
    pub date: NaiveDate,
}

#[axum::debug_handler]
pub async fn get_available_times(
    State(state): State<Arc<ApiState>>,
    headers: axum::http::HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    auth::authenticate(&state, &headers).await?;

    let rows = gators_db::repositories::schedule::list_active_for_trainer_date(
        &state.db_pool,
        query.trainer_id,
        query.date,
    )
    .await
    .map_err(AcademyError::Persistence)?;

    let schedules = rows
        .into_iter()
        .map(|row| row.into_domain())
        .collect::<eyre::Result<Vec<_>>>()
        .map_err(AcademyError::Persistence)?;

    let times = available_times(&schedules, query.trainer_id, query.date);

    Ok(Json(times))
}
