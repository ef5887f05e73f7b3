//! Opening hours and slot formatting for appointment booking.
//!
//! Candidate slots depend only on the day of the week:
//!
//! | Day              | Hours                              |
//! |------------------|------------------------------------|
//! | Monday - Friday  | 10, 11, 12, 13, 16, 17, 18         |
//! | Saturday         | 11, 12                             |
//! | Sunday           | closed                             |
//!
//! Whether a candidate is still free is decided by the storefront against
//! the booking calendar; this module is pure.

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

/// Date format accepted from the booking form (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const WEEKDAY_HOURS: &[u32] = &[10, 11, 12, 13, 16, 17, 18];
const SATURDAY_HOURS: &[u32] = &[11, 12];

/// Errors from slot computation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlotError {
    /// The date string is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `SlotError::InvalidDate` for malformed input or impossible dates
/// such as `2024-02-30`.
pub fn parse_date(input: &str) -> Result<NaiveDate, SlotError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| SlotError::InvalidDate {
        input: input.to_owned(),
        reason: e.to_string(),
    })
}

/// Opening hours for a day of the week, ascending.
#[must_use]
pub const fn candidate_hours(weekday: Weekday) -> &'static [u32] {
    match weekday {
        Weekday::Sun => &[],
        Weekday::Sat => SATURDAY_HOURS,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => WEEKDAY_HOURS,
    }
}

/// Format an hour as a zero-padded `HH:00` slot.
#[must_use]
pub fn format_slot(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// All candidate slots for a date, before removing booked ones.
#[must_use]
pub fn candidate_slots(date: NaiveDate) -> Vec<String> {
    candidate_hours(date.weekday())
        .iter()
        .copied()
        .map(format_slot)
        .collect()
}
