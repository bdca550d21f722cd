use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use gators_api::middleware::error_handling::AppError;
use gators_core::availability::available_times;
use gators_core::errors::AcademyError;
use gators_core::models::schedule::{CreateScheduleRequest, ScheduleStatus, TimeSlotField};
use gators_db::models::DbSchedule;

use crate::test_utils::TestContext;

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

fn db_schedule(trainer_id: Uuid, on: &str, time_slot: serde_json::Value) -> DbSchedule {
    DbSchedule {
        id: Uuid::new_v4(),
        trainer_id,
        date: day(on),
        time_slot,
        capacity: 1,
        status: "active".to_string(),
        created_at: Utc::now(),
    }
}

// Test wrapper replicating the availability handler: fetch the active
// schedules from the (mocked) repository, convert, and flatten.
async fn test_availability_wrapper(
    ctx: &mut TestContext,
    trainer_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<String>, AppError> {
    let rows = ctx
        .schedule_repo
        .list_active_for_trainer_date(trainer_id, date)
        .await?;

    let schedules = rows
        .into_iter()
        .map(|row| row.into_domain())
        .collect::<eyre::Result<Vec<_>>>()?;

    Ok(available_times(&schedules, trainer_id, date))
}

#[tokio::test]
async fn test_availability_flattens_stored_slot_shapes() {
    let mut ctx = TestContext::new();
    let trainer = Uuid::from_u128(7);
    let date = day("2026-08-10");

    ctx.schedule_repo
        .expect_list_active_for_trainer_date()
        .times(1)
        .returning(move |trainer_id, _| {
            Ok(vec![
                db_schedule(trainer_id, "2026-08-10", serde_json::json!("09:00 - 10:00")),
                db_schedule(
                    trainer_id,
                    "2026-08-10",
                    serde_json::json!(["10:00 - 11:00", "11:00 - 12:00"]),
                ),
            ])
        });

    let times = test_availability_wrapper(&mut ctx, trainer, date)
        .await
        .expect("availability lookup");

    assert_eq!(
        times,
        vec!["09:00 - 10:00", "10:00 - 11:00", "11:00 - 12:00"]
    );
}

#[tokio::test]
async fn test_availability_of_unscheduled_day_is_empty() {
    let mut ctx = TestContext::new();

    ctx.schedule_repo
        .expect_list_active_for_trainer_date()
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let times = test_availability_wrapper(&mut ctx, Uuid::from_u128(7), day("2026-08-10"))
        .await
        .expect("availability lookup");

    assert!(times.is_empty());
}

#[tokio::test]
async fn test_create_schedule_requires_fields_before_persistence() {
    // No expectations set: a repository call would panic
    let _ctx = TestContext::new();

    let request = CreateScheduleRequest {
        trainer_id: Some(Uuid::from_u128(7)),
        date: None,
        time_slot: Some(TimeSlotField::Single("09:00 - 10:00".to_string())),
        capacity: 1,
        status: ScheduleStatus::Active,
    };

    let err = request.validate().expect_err("date missing");
    assert!(matches!(err, AcademyError::Validation(_)));
    assert!(err.to_string().contains("date"));
}

#[tokio::test]
async fn test_create_schedule_rejects_zero_capacity() {
    let request = CreateScheduleRequest {
        trainer_id: Some(Uuid::from_u128(7)),
        date: Some(day("2026-08-10")),
        time_slot: Some(TimeSlotField::Single("09:00 - 10:00".to_string())),
        capacity: 0,
        status: ScheduleStatus::Active,
    };

    let err = request.validate().expect_err("capacity below 1");
    assert!(err.to_string().contains("capacity"));
}

#[tokio::test]
async fn test_overlapping_schedules_may_coexist() {
    // Declaring the same slot twice for one trainer/date is not an
    // error; both rows persist and both feed availability
    let mut ctx = TestContext::new();

    ctx.schedule_repo
        .expect_create_schedule()
        .times(2)
        .returning(|schedule| {
            Ok(DbSchedule {
                id: Uuid::new_v4(),
                trainer_id: schedule.trainer_id,
                date: schedule.date,
                time_slot: serde_json::to_value(&schedule.time_slot).unwrap(),
                capacity: schedule.capacity,
                status: schedule.status.as_str().to_string(),
                created_at: Utc::now(),
            })
        });

    let request = CreateScheduleRequest {
        trainer_id: Some(Uuid::from_u128(7)),
        date: Some(day("2026-08-10")),
        time_slot: Some(TimeSlotField::Single("09:00 - 10:00".to_string())),
        capacity: 1,
        status: ScheduleStatus::Active,
    };

    let first = ctx
        .schedule_repo
        .create_schedule(request.validate().unwrap())
        .await
        .expect("first schedule");
    let second = ctx
        .schedule_repo
        .create_schedule(request.validate().unwrap())
        .await
        .expect("second overlapping schedule");

    assert_eq!(first.trainer_id, second.trainer_id);
    assert_eq!(first.date, second.date);
    assert_eq!(first.time_slot, second.time_slot);
}
