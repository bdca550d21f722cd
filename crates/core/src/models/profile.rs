use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AcademyError;

/// Access role, assigned once at signup from the email domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trainer,
    Trainee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Trainer => "trainer",
            Role::Trainee => "trainee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "trainer" => Ok(Role::Trainer),
            "trainee" => Ok(Role::Trainee),
            other => Err(AcademyError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// Skill tier. Ordered: Level1 is the entry tier, then up through the
/// adult and competitive squads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Level1,
    Level2,
    Level3,
    Level4,
    Adult,
    #[serde(rename = "Dream Team")]
    DreamTeam,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Level1 => "Level1",
            Level::Level2 => "Level2",
            Level::Level3 => "Level3",
            Level::Level4 => "Level4",
            Level::Adult => "Adult",
            Level::DreamTeam => "Dream Team",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Level1" => Ok(Level::Level1),
            "Level2" => Ok(Level::Level2),
            "Level3" => Ok(Level::Level3),
            "Level4" => Ok(Level::Level4),
            "Adult" => Ok(Level::Adult),
            "Dream Team" => Ok(Level::DreamTeam),
            other => Err(AcademyError::Validation(format!("unknown level: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub level: Option<Level>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile edit. Email changes additionally touch the auth
/// account, so the API restricts them to admins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub level: Option<Level>,
}
