use serde::{Deserialize, Serialize};

use crate::errors::{AcademyError, AcademyResult};
use crate::models::booking::NewBooking;

/// Tunable booking rules.
///
/// Double-booking a trainer's slot is permitted by default: group lessons
/// share a slot and schedule capacity is informational. Deployments that
/// want exclusive slots opt in via `reject_slot_conflicts`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BookingPolicy {
    pub reject_slot_conflicts: bool,
}

impl BookingPolicy {
    /// Admits or refuses a new booking given how many bookings already
    /// occupy the same (trainer, day, time) slot.
    pub fn check_slot(&self, booking: &NewBooking, existing_in_slot: u64) -> AcademyResult<()> {
        if self.reject_slot_conflicts && existing_in_slot > 0 {
            return Err(AcademyError::Conflict(format!(
                "trainer {} is already booked on {} at {}",
                booking.trainer_id, booking.day, booking.time
            )));
        }
        Ok(())
    }
}
