use crate::models::booking::Booking;

/// Which fields a search term is matched against.
///
/// Admin views match display names only; the trainer dashboard also lets
/// the term hit the day and time columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    Names,
    NamesAndSlot,
}

/// Case-insensitive substring filter. An empty or whitespace-only term
/// matches everything.
pub fn filter_by_search(bookings: &[Booking], term: &str, scope: SearchScope) -> Vec<Booking> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return bookings.to_vec();
    }

    bookings
        .iter()
        .filter(|booking| matches(booking, &needle, scope))
        .cloned()
        .collect()
}

fn matches(booking: &Booking, needle: &str, scope: SearchScope) -> bool {
    let name_hit = contains(booking.student_name.as_deref(), needle)
        || contains(booking.trainer_name.as_deref(), needle);

    match scope {
        SearchScope::Names => name_hit,
        SearchScope::NamesAndSlot => {
            name_hit
                || booking.day.to_string().contains(needle)
                || booking.time.to_lowercase().contains(needle)
        }
    }
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}
