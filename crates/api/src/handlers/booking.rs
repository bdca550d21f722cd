//! # Booking Handlers
//!
//! The booking engine's HTTP surface: creation with validation, the
//! role-scoped list projection (search, stable sort), direct status and
//! attendance writes, deletion, and the aggregate statistics endpoint.
//!
//! Role scoping: trainees see and create only their own bookings,
//! trainers operate on bookings they own as trainer, admins on all.
//! Double-booking a trainer's slot is allowed unless the deployment opts
//! into `reject_slot_conflicts`.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use gators_core::{
    errors::AcademyError,
    models::booking::{
        Booking, CreateBookingRequest, SetAttendanceRequest, UpdateBookingRequest,
    },
    models::profile::Role,
    query::{
        search::{filter_by_search, SearchScope},
        sort::{sort_bookings, SortConfig, SortDirection, SortKey},
        stats::{attendance_progress, compute_stats, BookingStats},
    },
    session::{require_capability, Capability, Session},
};
use gators_db::repositories::booking::BookingFilter;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// Case-insensitive substring matched against display names (and, for
    /// trainers, the day/time columns)
    pub search: Option<String>,

    /// Column to sort by
    pub sort: Option<SortKey>,

    /// Sort direction (default ascending)
    pub direction: Option<SortDirection>,

    /// Equality filter on status
    pub status: Option<String>,

    /// Equality filter on day
    pub day: Option<NaiveDate>,
}

/// Restricts a booking filter to what the session is allowed to see.
fn scope_filter(session: &Session, mut filter: BookingFilter) -> BookingFilter {
    match session.role {
        Role::Admin => {}
        Role::Trainer => filter.trainer_id = Some(session.user_id),
        Role::Trainee => filter.student_id = Some(session.user_id),
    }
    filter
}

/// May this session edit or delete the given booking?
fn can_modify(session: &Session, booking: &Booking) -> bool {
    match session.role {
        Role::Admin => true,
        Role::Trainer => booking.trainer_id == session.user_id,
        Role::Trainee => false,
    }
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(mut payload): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    // Fill in the actor's own side of the booking and snapshot its
    // display name from the session rather than re-fetching the profile
    match session.role {
        Role::Trainee => {
            require_capability(&session, Capability::BookForSelf)?;
            payload.student_id = Some(session.user_id);
            if payload.student_name.is_none() {
                payload.student_name = Some(session.full_name.clone());
            }
        }
        Role::Trainer => {
            require_capability(&session, Capability::ManageOwnBookings)?;
            payload.trainer_id = Some(session.user_id);
            if payload.trainer_name.is_none() {
                payload.trainer_name = Some(session.full_name.clone());
            }
        }
        Role::Admin => {
            require_capability(&session, Capability::ManageAllBookings)?;
        }
    }

    // Validation runs before any persistence call
    let new_booking = payload.validate()?;

    // Slot-conflict handling is policy-driven; the default admits
    // overlapping bookings without consulting the store
    if state.booking_policy.reject_slot_conflicts {
        let existing = gators_db::repositories::booking::count_bookings_for_slot(
            &state.db_pool,
            new_booking.trainer_id,
            new_booking.day,
            &new_booking.time,
        )
        .await
        .map_err(AcademyError::Persistence)?;

        state.booking_policy.check_slot(&new_booking, existing as u64)?;
    }

    let created = gators_db::repositories::booking::create_booking(&state.db_pool, &new_booking)
        .await
        .map_err(AcademyError::Persistence)?;

    Ok(Json(created.into_domain().map_err(AcademyError::Persistence)?))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    // The status filter goes through the closed enum so an unknown value
    // fails loudly instead of silently matching nothing
    let status = query
        .status
        .as_deref()
        .map(str::parse::<gators_core::models::booking::BookingStatus>)
        .transpose()?
        .map(|status| status.as_str().to_string());

    let filter = scope_filter(
        &session,
        BookingFilter {
            day: query.day,
            status,
            ..BookingFilter::default()
        },
    );

    let rows = gators_db::repositories::booking::list_bookings(&state.db_pool, &filter)
        .await
        .map_err(AcademyError::Persistence)?;

    let mut bookings = rows
        .into_iter()
        .map(|row| row.into_domain())
        .collect::<eyre::Result<Vec<Booking>>>()
        .map_err(AcademyError::Persistence)?;

    // Trainers can search by day/time as well as by name
    let scope = match session.role {
        Role::Trainer => SearchScope::NamesAndSlot,
        _ => SearchScope::Names,
    };
    if let Some(term) = &query.search {
        bookings = filter_by_search(&bookings, term, scope);
    }

    let config = SortConfig {
        key: query.sort,
        direction: query.direction.unwrap_or_default(),
    };
    sort_bookings(&mut bookings, &config);

    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let booking = gators_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Booking with ID {} not found", id)))?
        .into_domain()
        .map_err(AcademyError::Persistence)?;

    let is_party = booking.student_id == session.user_id || booking.trainer_id == session.user_id;
    if session.role != Role::Admin && !is_party {
        return Err(AppError(AcademyError::Authorization(
            "not a party to this booking".to_string(),
        )));
    }

    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let booking = gators_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Booking with ID {} not found", id)))?
        .into_domain()
        .map_err(AcademyError::Persistence)?;

    if !can_modify(&session, &booking) {
        return Err(AppError(AcademyError::Authorization(
            "may not edit this booking".to_string(),
        )));
    }

    if patch.is_empty() {
        return Ok(Json(booking));
    }

    let updated = gators_db::repositories::booking::update_booking(&state.db_pool, id, &patch)
        .await
        .map_err(AcademyError::Persistence)?;

    Ok(Json(updated.into_domain().map_err(AcademyError::Persistence)?))
}

#[axum::debug_handler]
pub async fn set_attendance(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAttendanceRequest>,
) -> Result<Json<Booking>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    require_capability(&session, Capability::RecordAttendance)?;

    let booking = gators_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Booking with ID {} not found", id)))?
        .into_domain()
        .map_err(AcademyError::Persistence)?;

    if !can_modify(&session, &booking) {
        return Err(AppError(AcademyError::Authorization(
            "may not record attendance for this booking".to_string(),
        )));
    }

    // Attendance is written alone; status stays whatever it was
    let updated = gators_db::repositories::booking::set_attendance(
        &state.db_pool,
        id,
        payload.attendance.map(|attendance| attendance.as_str()),
    )
    .await
    .map_err(AcademyError::Persistence)?;

    Ok(Json(updated.into_domain().map_err(AcademyError::Persistence)?))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let booking = gators_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?
        .ok_or_else(|| AcademyError::NotFound(format!("Booking with ID {} not found", id)))?
        .into_domain()
        .map_err(AcademyError::Persistence)?;

    if !can_modify(&session, &booking) {
        return Err(AppError(AcademyError::Authorization(
            "may not delete this booking".to_string(),
        )));
    }

    gators_db::repositories::booking::delete_booking(&state.db_pool, id)
        .await
        .map_err(AcademyError::Persistence)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Aggregate statistics over the full (unfiltered) role-scoped dataset.
#[axum::debug_handler]
pub async fn booking_stats(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<BookingStats>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;
    require_capability(&session, Capability::ViewStats)?;

    let filter = scope_filter(&session, BookingFilter::default());
    let rows = gators_db::repositories::booking::list_bookings(&state.db_pool, &filter)
        .await
        .map_err(AcademyError::Persistence)?;

    let bookings = rows
        .into_iter()
        .map(|row| row.into_domain())
        .collect::<eyre::Result<Vec<Booking>>>()
        .map_err(AcademyError::Persistence)?;

    let schedule_rows = gators_db::repositories::schedule::list_schedules(
        &state.db_pool,
        (session.role == Role::Trainer).then_some(session.user_id),
    )
    .await
    .map_err(AcademyError::Persistence)?;

    let schedules = schedule_rows
        .into_iter()
        .map(|row| row.into_domain().map(|(schedule, _)| schedule))
        .collect::<eyre::Result<Vec<_>>>()
        .map_err(AcademyError::Persistence)?;

    let today = Utc::now().date_naive();
    Ok(Json(compute_stats(&bookings, &schedules, today)))
}

#[derive(Debug, serde::Serialize)]
pub struct ProgressResponse {
    pub total: usize,
    pub attended: usize,
    pub progress: f64,
}

/// Trainee-facing training progress over the caller's own bookings.
#[axum::debug_handler]
pub async fn booking_progress(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<ProgressResponse>, AppError> {
    let session = auth::authenticate(&state, &headers).await?;

    let filter = BookingFilter {
        student_id: Some(session.user_id),
        ..BookingFilter::default()
    };
    let rows = gators_db::repositories::booking::list_bookings(&state.db_pool, &filter)
        .await
        .map_err(AcademyError::Persistence)?;

    let bookings = rows
        .into_iter()
        .map(|row| row.into_domain())
        .collect::<eyre::Result<Vec<Booking>>>()
        .map_err(AcademyError::Persistence)?;

    let attended = bookings
        .iter()
        .filter(|booking| {
            booking.attendance == Some(gators_core::models::booking::Attendance::Present)
        })
        .count();

    Ok(Json(ProgressResponse {
        total: bookings.len(),
        attended,
        progress: attendance_progress(&bookings),
    }))
}
