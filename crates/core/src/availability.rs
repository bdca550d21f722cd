use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::schedule::{Schedule, ScheduleStatus};

/// Time slots a trainer offers on a date: the flattened `time_slot`
/// values of every active schedule matching (trainer, date), in input
/// order. No deduplication — a slot declared twice is returned twice.
/// Returns an empty list when nothing matches; the booking form keeps the
/// time picker disabled until this is non-empty.
pub fn available_times(schedules: &[Schedule], trainer_id: Uuid, date: NaiveDate) -> Vec<String> {
    schedules
        .iter()
        .filter(|schedule| {
            schedule.trainer_id == trainer_id
                && schedule.date == date
                && schedule.status == ScheduleStatus::Active
        })
        .flat_map(|schedule| schedule.time_slot.to_vec())
        .collect()
}
