use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use gators_api::middleware::error_handling::AppError;
use gators_core::errors::AcademyError;
use gators_core::models::booking::{BookingStatus, CreateBookingRequest};
use gators_core::policy::BookingPolicy;
use gators_db::models::DbBooking;

use crate::test_utils::TestContext;

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

fn complete_request() -> CreateBookingRequest {
    CreateBookingRequest {
        student_id: Some(Uuid::from_u128(1)),
        trainer_id: Some(Uuid::from_u128(2)),
        day: Some(day("2026-08-10")),
        time: Some("09:00 - 10:00".to_string()),
        status: BookingStatus::Confirmed,
        level: None,
        student_name: Some("Ali Hassan".to_string()),
        trainer_name: Some("Coach Sara".to_string()),
    }
}

fn db_booking(request: &CreateBookingRequest) -> DbBooking {
    DbBooking {
        id: Uuid::new_v4(),
        student_id: request.student_id.unwrap(),
        trainer_id: request.trainer_id.unwrap(),
        day: request.day.unwrap(),
        time: request.time.clone().unwrap(),
        status: request.status.as_str().to_string(),
        attendance: None,
        level: None,
        student_name: request.student_name.clone(),
        trainer_name: request.trainer_name.clone(),
        created_at: Utc::now(),
    }
}

// Test wrapper replicating the create handler's decision sequence with
// the mocks standing in for the repositories: validation first, then the
// optional conflict policy, then the insert.
async fn test_create_booking_wrapper(
    ctx: &mut TestContext,
    request: CreateBookingRequest,
    policy: BookingPolicy,
) -> Result<DbBooking, AppError> {
    // Validation runs before any persistence call
    let new_booking = request.validate()?;

    if policy.reject_slot_conflicts {
        let time_static: &'static str = Box::leak(new_booking.time.clone().into_boxed_str());
        let existing = ctx
            .booking_repo
            .count_bookings_for_slot(new_booking.trainer_id, new_booking.day, time_static)
            .await?;
        policy.check_slot(&new_booking, existing as u64)?;
    }

    let created = ctx.booking_repo.create_booking(new_booking).await?;
    Ok(created)
}

#[tokio::test]
async fn test_invalid_booking_issues_no_persistence_call() {
    // No expectations are set on any mock: any repository call would
    // panic the test, proving validation short-circuits persistence
    let mut ctx = TestContext::new();

    let mut request = complete_request();
    request.time = None;

    let err = test_create_booking_wrapper(&mut ctx, request, BookingPolicy::default())
        .await
        .expect_err("incomplete request must fail");

    assert!(matches!(err.0, AcademyError::Validation(_)));
    assert!(err.0.to_string().contains("time"));
}

#[tokio::test]
async fn test_create_booking_persists_valid_request() {
    let mut ctx = TestContext::new();
    let request = complete_request();
    let stored = db_booking(&request);

    let returned = stored.clone();
    ctx.booking_repo
        .expect_create_booking()
        .times(1)
        .returning(move |_| Ok(returned.clone()));

    let created = test_create_booking_wrapper(&mut ctx, request, BookingPolicy::default())
        .await
        .expect("valid request persists");

    assert_eq!(created.status, "confirmed");
    assert_eq!(created.student_name.as_deref(), Some("Ali Hassan"));
    assert_eq!(created.trainer_name.as_deref(), Some("Coach Sara"));
}

#[tokio::test]
async fn test_double_booking_is_permitted_by_default() {
    // Two bookings for the same trainer/day/time both succeed under the
    // default policy; the conflict count is never even consulted. Any
    // future tightening has to change this assertion deliberately.
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_create_booking()
        .times(2)
        .returning(|booking| {
            Ok(DbBooking {
                id: Uuid::new_v4(),
                student_id: booking.student_id,
                trainer_id: booking.trainer_id,
                day: booking.day,
                time: booking.time.clone(),
                status: booking.status.as_str().to_string(),
                attendance: None,
                level: None,
                student_name: booking.student_name.clone(),
                trainer_name: booking.trainer_name.clone(),
                created_at: Utc::now(),
            })
        });

    let first = test_create_booking_wrapper(&mut ctx, complete_request(), BookingPolicy::default())
        .await
        .expect("first booking");
    let second = test_create_booking_wrapper(&mut ctx, complete_request(), BookingPolicy::default())
        .await
        .expect("second booking for the identical slot");

    assert_eq!(first.trainer_id, second.trainer_id);
    assert_eq!(first.day, second.day);
    assert_eq!(first.time, second.time);
}

#[tokio::test]
async fn test_conflict_policy_refuses_occupied_slot() {
    let mut ctx = TestContext::new();
    let policy = BookingPolicy {
        reject_slot_conflicts: true,
    };

    ctx.booking_repo
        .expect_count_bookings_for_slot()
        .times(1)
        .returning(|_, _, _| Ok(1));

    let err = test_create_booking_wrapper(&mut ctx, complete_request(), policy)
        .await
        .expect_err("occupied slot refused under the opt-in policy");

    assert!(matches!(err.0, AcademyError::Conflict(_)));
}

#[tokio::test]
async fn test_conflict_policy_admits_free_slot() {
    let mut ctx = TestContext::new();
    let policy = BookingPolicy {
        reject_slot_conflicts: true,
    };
    let request = complete_request();
    let stored = db_booking(&request);

    ctx.booking_repo
        .expect_count_bookings_for_slot()
        .times(1)
        .returning(|_, _, _| Ok(0));
    let returned = stored.clone();
    ctx.booking_repo
        .expect_create_booking()
        .times(1)
        .returning(move |_| Ok(returned.clone()));

    test_create_booking_wrapper(&mut ctx, request, policy)
        .await
        .expect("free slot admitted");
}

#[tokio::test]
async fn test_set_attendance_leaves_status_untouched() {
    let mut ctx = TestContext::new();
    let request = complete_request();
    let stored = db_booking(&request);
    let id = stored.id;

    let returned = stored.clone();
    ctx.booking_repo
        .expect_set_attendance()
        .times(1)
        .returning(move |_, attendance| {
            let mut row = returned.clone();
            row.attendance = attendance.map(|a| a.to_string());
            Ok(row)
        });

    let updated = ctx
        .booking_repo
        .set_attendance(id, Some("present"))
        .await
        .expect("attendance recorded");

    assert_eq!(updated.attendance.as_deref(), Some("present"));
    // Status stays on its own track
    assert_eq!(updated.status, "confirmed");
}

#[tokio::test]
async fn test_delete_booking_reports_missing_rows() {
    let mut ctx = TestContext::new();
    let present = Uuid::from_u128(10);
    let absent = Uuid::from_u128(11);

    ctx.booking_repo
        .expect_delete_booking()
        .returning(move |id| Ok(id == present));

    assert!(ctx.booking_repo.delete_booking(present).await.unwrap());
    assert!(!ctx.booking_repo.delete_booking(absent).await.unwrap());
}
