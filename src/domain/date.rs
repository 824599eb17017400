//! Calendar date handling
//!
//! All dates are entered and displayed as `DD/MM/YYYY`. Day and month may be
//! written with one or two digits; the year must have exactly four.

use chrono::NaiveDate;

use super::validation::ValidationError;

/// Textual date format used for input and output
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `DD/MM/YYYY` date
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDateFormat(input.to_string());

    let mut parts = input.split('/');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let is_numeric = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };

    if !is_numeric(day, 1, 2) || !is_numeric(month, 1, 2) || !is_numeric(year, 4, 4) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// Formats a date as `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole days between two dates (`end - start`)
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Serde adapter writing dates as `DD/MM/YYYY` strings
pub mod serde_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }
}
