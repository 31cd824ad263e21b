//! Calendar helpers shared by the extraction engine and the schedule layer.
//!
//! Dates stay typed (`NaiveDate`) everywhere inside the workspace and are only
//! rendered to the French `DD/MM/YYYY` display form at the boundary.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Display format used in periods and spreadsheet cells.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Format a date as `DD/MM/YYYY`.
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parse a `D/M/YYYY` or `DD/MM/YYYY` value.
///
/// Returns `None` for anything that is not three slash-separated numeric parts
/// with a four-digit year forming a real calendar date.
pub fn parse_display(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split('/');
    let day = parts.next()?.trim();
    let month = parts.next()?.trim();
    let year = parts.next()?.trim();
    if parts.next().is_some() || year.len() != 4 {
        return None;
    }
    if ![day, month, year]
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Walk backwards from `date`, counting only weekdays, until `working_days`
/// Monday-to-Friday days have been stepped over.
///
/// `subtract_working_days(monday, 1)` is the previous Friday.
pub fn subtract_working_days(date: NaiveDate, working_days: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = working_days;
    while remaining > 0 {
        let Some(previous) = current.checked_sub_days(Days::new(1)) else {
            break;
        };
        current = previous;
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}

/// Inclusive number of calendar days between two dates (same day = 1).
pub fn inclusive_span_days(first: NaiveDate, last: NaiveDate) -> i64 {
    (last - first).num_days().abs() + 1
}
