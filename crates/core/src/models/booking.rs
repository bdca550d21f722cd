use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AcademyError, AcademyResult};
use crate::models::profile::Level;

/// The fixed hour-long slots a session can occupy, 08:00 through 20:00.
pub const HOUR_SLOTS: [&str; 12] = [
    "08:00 - 09:00",
    "09:00 - 10:00",
    "10:00 - 11:00",
    "11:00 - 12:00",
    "12:00 - 13:00",
    "13:00 - 14:00",
    "14:00 - 15:00",
    "15:00 - 16:00",
    "16:00 - 17:00",
    "17:00 - 18:00",
    "18:00 - 19:00",
    "19:00 - 20:00",
];

/// Administrative lifecycle stage of a booking. Any status may be written
/// over any other by an authorized actor; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Attended,
    Absent,
    Apologized,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Attended => "attended",
            BookingStatus::Absent => "absent",
            BookingStatus::Apologized => "apologized",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "attended" => Ok(BookingStatus::Attended),
            "absent" => Ok(BookingStatus::Absent),
            "apologized" => Ok(BookingStatus::Apologized),
            other => Err(AcademyError::Validation(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

/// Post-hoc record of whether the trainee appeared. Independent of
/// `BookingStatus`; setting one never changes the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Present,
    Absent,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Present => "present",
            Attendance::Absent => "absent",
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attendance {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Attendance::Present),
            "absent" => Ok(Attendance::Absent),
            other => Err(AcademyError::Validation(format!(
                "unknown attendance: {other}"
            ))),
        }
    }
}

/// A session reservation linking a trainee and a trainer at a date/time.
///
/// `student_name` and `trainer_name` are display snapshots captured at
/// creation. They are never re-synced when a profile is renamed; list
/// queries prefer the live joined name and fall back to the snapshot when
/// the profile row is gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub student_id: Uuid,
    pub trainer_id: Uuid,
    pub day: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub attendance: Option<Attendance>,
    pub level: Option<Level>,
    pub student_name: Option<String>,
    pub trainer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub student_id: Option<Uuid>,
    pub trainer_id: Option<Uuid>,
    pub day: Option<NaiveDate>,
    pub time: Option<String>,
    #[serde(default = "default_booking_status")]
    pub status: BookingStatus,
    pub level: Option<Level>,
    pub student_name: Option<String>,
    pub trainer_name: Option<String>,
}

fn default_booking_status() -> BookingStatus {
    BookingStatus::Confirmed
}

/// A validated booking ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub student_id: Uuid,
    pub trainer_id: Uuid,
    pub day: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub level: Option<Level>,
    pub student_name: Option<String>,
    pub trainer_name: Option<String>,
}

impl CreateBookingRequest {
    /// Field-completion check. Runs before any persistence call; the error
    /// names every missing field so the caller can surface them at once.
    pub fn validate(&self) -> AcademyResult<NewBooking> {
        let mut missing = Vec::new();
        if self.student_id.is_none() {
            missing.push("student_id");
        }
        if self.trainer_id.is_none() {
            missing.push("trainer_id");
        }
        if self.day.is_none() {
            missing.push("day");
        }
        if self.time.as_deref().map_or(true, |t| t.trim().is_empty()) {
            missing.push("time");
        }
        if !missing.is_empty() {
            return Err(AcademyError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(NewBooking {
            student_id: self.student_id.unwrap(),
            trainer_id: self.trainer_id.unwrap(),
            day: self.day.unwrap(),
            time: self.time.clone().unwrap(),
            status: self.status,
            level: self.level,
            student_name: self.student_name.clone(),
            trainer_name: self.trainer_name.clone(),
        })
    }
}

/// Partial booking edit issued by a trainer or admin. Absent fields keep
/// their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    pub student_id: Option<Uuid>,
    pub trainer_id: Option<Uuid>,
    pub day: Option<NaiveDate>,
    pub time: Option<String>,
    pub status: Option<BookingStatus>,
}

impl UpdateBookingRequest {
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none()
            && self.trainer_id.is_none()
            && self.day.is_none()
            && self.time.is_none()
            && self.status.is_none()
    }
}

/// Attendance write issued by a trainer after a session. `None` clears a
/// previously recorded value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAttendanceRequest {
    pub attendance: Option<Attendance>,
}
