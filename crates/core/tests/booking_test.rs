use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use gators_core::errors::AcademyError;
use gators_core::models::booking::{BookingStatus, CreateBookingRequest, NewBooking};
use gators_core::models::profile::Level;
use gators_core::policy::BookingPolicy;

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
        level: Some(Level::Level1),
        student_name: Some("Ali Hassan".to_string()),
        trainer_name: Some("Coach Sara".to_string()),
    }
}

#[test]
fn test_validate_accepts_complete_request() {
    let new_booking = complete_request().validate().expect("complete request");

    assert_eq!(new_booking.student_id, Uuid::from_u128(1));
    assert_eq!(new_booking.trainer_id, Uuid::from_u128(2));
    assert_eq!(new_booking.day, day("2026-08-10"));
    assert_eq!(new_booking.time, "09:00 - 10:00");
    assert_eq!(new_booking.status, BookingStatus::Confirmed);
}

#[rstest]
#[case::no_student("student_id")]
#[case::no_trainer("trainer_id")]
#[case::no_day("day")]
#[case::no_time("time")]
fn test_validate_rejects_missing_field(#[case] field: &str) {
    let mut request = complete_request();
    match field {
        "student_id" => request.student_id = None,
        "trainer_id" => request.trainer_id = None,
        "day" => request.day = None,
        "time" => request.time = None,
        _ => unreachable!(),
    }

    let err = request.validate().expect_err("incomplete request");
    match err {
        AcademyError::Validation(message) => assert!(
            message.contains(field),
            "error should name the missing field {field}: {message}"
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_validate_treats_blank_time_as_missing() {
    let mut request = complete_request();
    request.time = Some("   ".to_string());

    let err = request.validate().expect_err("blank time");
    assert!(matches!(err, AcademyError::Validation(_)));
}

#[test]
fn test_validate_names_every_missing_field_at_once() {
    let request = CreateBookingRequest {
        student_id: None,
        trainer_id: None,
        day: None,
        time: None,
        status: BookingStatus::Confirmed,
        level: None,
        student_name: None,
        trainer_name: None,
    };

    let err = request.validate().expect_err("empty request");
    let AcademyError::Validation(message) = err else {
        panic!("expected validation error");
    };
    for field in ["student_id", "trainer_id", "day", "time"] {
        assert!(message.contains(field), "missing {field} in: {message}");
    }
}

fn new_booking() -> NewBooking {
    complete_request().validate().unwrap()
}

#[test]
fn test_default_policy_permits_double_booking() {
    // Two bookings on the same trainer/day/time are both admitted under
    // the default policy; tightening this is a deliberate config change
    let policy = BookingPolicy::default();
    assert!(!policy.reject_slot_conflicts);

    policy.check_slot(&new_booking(), 0).expect("empty slot");
    policy.check_slot(&new_booking(), 1).expect("occupied slot still admitted");
    policy.check_slot(&new_booking(), 5).expect("crowded slot still admitted");
}

#[test]
fn test_conflict_policy_rejects_occupied_slot() {
    let policy = BookingPolicy {
        reject_slot_conflicts: true,
    };

    policy.check_slot(&new_booking(), 0).expect("empty slot admitted");

    let err = policy
        .check_slot(&new_booking(), 1)
        .expect_err("occupied slot refused");
    assert!(matches!(err, AcademyError::Conflict(_)));
    assert!(err.to_string().contains("2026-08-10"));
    assert!(err.to_string().contains("09:00 - 10:00"));
}
