use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AcademyError, AcademyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Active,
    Inactive,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Active => "active",
            ScheduleStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ScheduleStatus::Active),
            "inactive" => Ok(ScheduleStatus::Inactive),
            other => Err(AcademyError::Validation(format!(
                "unknown schedule status: {other}"
            ))),
        }
    }
}

/// The `time_slot` column holds either a single slot string or a list of
/// them; both shapes occur in stored data and must round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeSlotField {
    Single(String),
    Many(Vec<String>),
}

impl TimeSlotField {
    /// Flattens to a plain list, preserving order and duplicates.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            TimeSlotField::Single(slot) => vec![slot.clone()],
            TimeSlotField::Many(slots) => slots.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TimeSlotField::Single(slot) => slot.trim().is_empty(),
            TimeSlotField::Many(slots) => slots.is_empty(),
        }
    }
}

/// A trainer's declared availability block. Potential availability only;
/// bookings do not decrement `capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: TimeSlotField,
    pub capacity: i32,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub trainer_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlotField>,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default = "default_status")]
    pub status: ScheduleStatus,
}

fn default_capacity() -> i32 {
    1
}

fn default_status() -> ScheduleStatus {
    ScheduleStatus::Active
}

/// A validated schedule ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
    pub trainer_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: TimeSlotField,
    pub capacity: i32,
    pub status: ScheduleStatus,
}

impl CreateScheduleRequest {
    pub fn validate(&self) -> AcademyResult<NewSchedule> {
        let mut missing = Vec::new();
        if self.trainer_id.is_none() {
            missing.push("trainer_id");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time_slot.as_ref().map_or(true, TimeSlotField::is_empty) {
            missing.push("time_slot");
        }
        if !missing.is_empty() {
            return Err(AcademyError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        if self.capacity < 1 {
            return Err(AcademyError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }

        Ok(NewSchedule {
            trainer_id: self.trainer_id.unwrap(),
            date: self.date.unwrap(),
            time_slot: self.time_slot.clone().unwrap(),
            capacity: self.capacity,
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub trainer_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlotField>,
    pub capacity: Option<i32>,
    pub status: Option<ScheduleStatus>,
}

/// Schedule joined with the owning trainer's display name for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub trainer_name: Option<String>,
}
