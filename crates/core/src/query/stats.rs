use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::booking::{Attendance, Booking, BookingStatus};
use crate::models::schedule::{Schedule, ScheduleStatus};

/// Aggregates over the FULL booking set. These are computed before any
/// search or filter narrowing so the dashboard tiles reflect the whole
/// dataset, not the current table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingStats {
    pub total: usize,
    pub by_status: HashMap<BookingStatus, usize>,
    pub unique_trainees: usize,
    /// Confirmed sessions falling on the reference date.
    pub sessions_today: usize,
    pub active_schedules: usize,
}

pub fn compute_stats(bookings: &[Booking], schedules: &[Schedule], today: NaiveDate) -> BookingStats {
    let mut by_status: HashMap<BookingStatus, usize> = HashMap::new();
    let mut trainees: HashSet<_> = HashSet::new();
    let mut sessions_today = 0;

    for booking in bookings {
        *by_status.entry(booking.status).or_insert(0) += 1;
        trainees.insert(booking.student_id);
        if booking.day == today && booking.status == BookingStatus::Confirmed {
            sessions_today += 1;
        }
    }

    let active_schedules = schedules
        .iter()
        .filter(|schedule| schedule.status == ScheduleStatus::Active)
        .count();

    BookingStats {
        total: bookings.len(),
        by_status,
        unique_trainees: trainees.len(),
        sessions_today,
        active_schedules,
    }
}

/// Trainee progress as a percentage: bookings with attendance recorded as
/// present over all bookings. An empty set is 0%, never NaN.
pub fn attendance_progress(bookings: &[Booking]) -> f64 {
    if bookings.is_empty() {
        return 0.0;
    }
    let attended = bookings
        .iter()
        .filter(|booking| booking.attendance == Some(Attendance::Present))
        .count();
    attended as f64 / bookings.len() as f64 * 100.0
}
