use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use gators_core::models::booking::{Attendance, Booking, BookingStatus};
use gators_core::models::profile::{Level, Profile, Role};
use gators_core::models::schedule::{Schedule, ScheduleStatus, TimeSlotField};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbProfile {
    pub fn into_domain(self) -> Result<Profile> {
        Ok(Profile {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            role: Role::from_str(&self.role).map_err(|e| eyre::eyre!(e))?,
            level: self
                .level
                .as_deref()
                .map(Level::from_str)
                .transpose()
                .map_err(|e| eyre::eyre!(e))?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: serde_json::Value,
    pub capacity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl DbSchedule {
    pub fn into_domain(self) -> Result<Schedule> {
        Ok(Schedule {
            id: self.id,
            trainer_id: self.trainer_id,
            date: self.date,
            time_slot: serde_json::from_value::<TimeSlotField>(self.time_slot)?,
            capacity: self.capacity,
            status: ScheduleStatus::from_str(&self.status).map_err(|e| eyre::eyre!(e))?,
            created_at: self.created_at,
        })
    }
}

/// Schedule row joined with the owning trainer's current display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleWithTrainer {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: serde_json::Value,
    pub capacity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub trainer_name: Option<String>,
}

impl DbScheduleWithTrainer {
    pub fn into_domain(self) -> Result<(Schedule, Option<String>)> {
        let trainer_name = self.trainer_name.clone();
        let schedule = DbSchedule {
            id: self.id,
            trainer_id: self.trainer_id,
            date: self.date,
            time_slot: self.time_slot,
            capacity: self.capacity,
            status: self.status,
            created_at: self.created_at,
        }
        .into_domain()?;
        Ok((schedule, trainer_name))
    }
}

/// Booking row. List queries COALESCE the joined live profile names over
/// the stored snapshots into `student_name`/`trainer_name`, so the same
/// row type serves both the plain and the joined selects.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub student_id: Uuid,
    pub trainer_id: Uuid,
    pub day: NaiveDate,
    pub time: String,
    pub status: String,
    pub attendance: Option<String>,
    pub level: Option<String>,
    pub student_name: Option<String>,
    pub trainer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbBooking {
    pub fn into_domain(self) -> Result<Booking> {
        Ok(Booking {
            id: self.id,
            student_id: self.student_id,
            trainer_id: self.trainer_id,
            day: self.day,
            time: self.time,
            status: BookingStatus::from_str(&self.status).map_err(|e| eyre::eyre!(e))?,
            attendance: self
                .attendance
                .as_deref()
                .map(Attendance::from_str)
                .transpose()
                .map_err(|e| eyre::eyre!(e))?,
            level: self
                .level
                .as_deref()
                .map(Level::from_str)
                .transpose()
                .map_err(|e| eyre::eyre!(e))?,
            student_name: self.student_name,
            trainer_name: self.trainer_name,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAuthAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: Uuid,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
}
