//! Explicit per-request session context and the capability checks gating
//! every operation.
//!
//! A `Session` is created at login, resolved from the bearer token on each
//! request, and torn down at logout. There is no ambient current-user
//! state anywhere in the service; handlers receive the session as a value
//! and pass it to `has_capability` before acting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AcademyError, AcademyResult};
use crate::models::profile::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Actions a session may be permitted to perform. Trainer-held
/// capabilities over bookings and schedules are additionally scoped to
/// rows owned by that trainer; the scoping check lives with the handler
/// that knows the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, edit, and delete any booking.
    ManageAllBookings,
    /// Create, edit, and delete bookings where the actor is the trainer.
    ManageOwnBookings,
    /// Create a booking for oneself as the trainee.
    BookForSelf,
    /// Record or clear attendance on a booking.
    RecordAttendance,
    /// Create, edit, and delete availability schedules.
    ManageSchedules,
    /// Edit and delete profile records other than one's own.
    ManageProfiles,
    /// Read aggregate booking statistics.
    ViewStats,
}

pub fn has_capability(session: &Session, capability: Capability) -> bool {
    match session.role {
        Role::Admin => true,
        Role::Trainer => matches!(
            capability,
            Capability::ManageOwnBookings
                | Capability::RecordAttendance
                | Capability::ManageSchedules
                | Capability::ViewStats
        ),
        Role::Trainee => matches!(capability, Capability::BookForSelf),
    }
}

/// Capability check as a guard, for use with `?` in handlers.
pub fn require_capability(session: &Session, capability: Capability) -> AcademyResult<()> {
    if has_capability(session, capability) {
        Ok(())
    } else {
        Err(AcademyError::Authorization(format!(
            "role {} may not perform this action",
            session.role
        )))
    }
}
