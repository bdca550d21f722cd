use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use gators_core::availability::available_times;
use gators_core::models::schedule::{Schedule, ScheduleStatus, TimeSlotField};

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

fn schedule(
    trainer_id: Uuid,
    on: &str,
    time_slot: TimeSlotField,
    status: ScheduleStatus,
) -> Schedule {
    Schedule {
        id: Uuid::new_v4(),
        trainer_id,
        date: day(on),
        time_slot,
        capacity: 1,
        status,
        created_at: Utc::now(),
    }
}

#[test]
fn test_flattens_single_and_list_slots() {
    let trainer = Uuid::from_u128(7);
    let schedules = vec![
        schedule(
            trainer,
            "2026-08-10",
            TimeSlotField::Single("09:00 - 10:00".to_string()),
            ScheduleStatus::Active,
        ),
        schedule(
            trainer,
            "2026-08-10",
            TimeSlotField::Many(vec![
                "10:00 - 11:00".to_string(),
                "11:00 - 12:00".to_string(),
            ]),
            ScheduleStatus::Active,
        ),
    ];

    let times = available_times(&schedules, trainer, day("2026-08-10"));
    assert_eq!(
        times,
        vec!["09:00 - 10:00", "10:00 - 11:00", "11:00 - 12:00"]
    );
}

#[test]
fn test_excludes_inactive_schedules() {
    let trainer = Uuid::from_u128(7);
    let schedules = vec![
        schedule(
            trainer,
            "2026-08-10",
            TimeSlotField::Single("09:00 - 10:00".to_string()),
            ScheduleStatus::Inactive,
        ),
        schedule(
            trainer,
            "2026-08-10",
            TimeSlotField::Single("10:00 - 11:00".to_string()),
            ScheduleStatus::Active,
        ),
    ];

    let times = available_times(&schedules, trainer, day("2026-08-10"));
    assert_eq!(times, vec!["10:00 - 11:00"]);
}

#[test]
fn test_excludes_other_trainers_and_dates() {
    let trainer = Uuid::from_u128(7);
    let other = Uuid::from_u128(8);
    let schedules = vec![
        schedule(
            other,
            "2026-08-10",
            TimeSlotField::Single("09:00 - 10:00".to_string()),
            ScheduleStatus::Active,
        ),
        schedule(
            trainer,
            "2026-08-11",
            TimeSlotField::Single("10:00 - 11:00".to_string()),
            ScheduleStatus::Active,
        ),
    ];

    assert!(available_times(&schedules, trainer, day("2026-08-10")).is_empty());
}

#[test]
fn test_no_schedules_means_no_times() {
    assert!(available_times(&[], Uuid::from_u128(7), day("2026-08-10")).is_empty());
}

#[test]
fn test_duplicate_slots_propagate_as_is() {
    // No dedup step: a slot declared by two overlapping schedules shows
    // up twice
    let trainer = Uuid::from_u128(7);
    let schedules = vec![
        schedule(
            trainer,
            "2026-08-10",
            TimeSlotField::Single("09:00 - 10:00".to_string()),
            ScheduleStatus::Active,
        ),
        schedule(
            trainer,
            "2026-08-10",
            TimeSlotField::Single("09:00 - 10:00".to_string()),
            ScheduleStatus::Active,
        ),
    ];

    let times = available_times(&schedules, trainer, day("2026-08-10"));
    assert_eq!(times, vec!["09:00 - 10:00", "09:00 - 10:00"]);
}
