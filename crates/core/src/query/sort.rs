use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::booking::Booking;

/// Column a booking table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    StudentName,
    TrainerName,
    Day,
    Time,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Current sort selection of a table view.
///
/// `toggle` reproduces the header-click behavior: clicking the already
/// selected column while ascending flips it to descending; clicking it
/// again, or clicking any other column, resets to ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    pub fn toggle(&mut self, key: SortKey) {
        let direction = if self.key == Some(key) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key);
        self.direction = direction;
    }
}

/// Sorts in place by the selected column. The sort is stable: records
/// comparing equal on the key keep their relative input order, in both
/// directions. No key selected leaves the list untouched.
pub fn sort_bookings(bookings: &mut [Booking], config: &SortConfig) {
    let Some(key) = config.key else {
        return;
    };

    bookings.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, key);
        match config.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_by_key(a: &Booking, b: &Booking, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::StudentName => a.student_name.cmp(&b.student_name),
        SortKey::TrainerName => a.trainer_name.cmp(&b.trainer_name),
        SortKey::Day => a.day.cmp(&b.day),
        SortKey::Time => a.time.cmp(&b.time),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}
