use chrono::{
    Datelike,
    Local,
    NaiveDate,
};

use crate::ValidationError;

/// Pure
#[must_use] pub fn format_date(date: NaiveDate) -> String {
    date.format("%F").to_string()
}

/// Pure
///
/// Only the exact `YYYY-MM-DD` form is accepted: no sign, no padding
/// whitespace, no single-digit month or day.
///
/// # Errors
/// Returns an error if the string is not a valid `YYYY-MM-DD` date
pub fn parse_date(date_string: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date_string, "%F")
        .ok()
        .filter(|d| date_string.len() == 10 && format_date(*d) == date_string)
        .ok_or_else(|| ValidationError::InvalidDate(date_string.into()))
}

/// Whether the date can be written as `YYYY-MM-DD`
#[must_use] pub fn is_four_digit_year(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Impure (reads system clock)
#[must_use] pub fn today_date() -> NaiveDate {
    Local::now().naive_local().date()
}

/// Impure (reads system clock)
#[must_use] pub fn current_year() -> i32 {
    today_date().year()
}
