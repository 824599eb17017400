//! Input validation for entities entering a project
//!
//! Every check runs before anything is appended, so a rejected entity never
//! leaves partial state behind.

use chrono::NaiveDate;
use thiserror::Error;

use super::date::{format_date, parse_date};

/// Probability bounds for a risk (inclusive)
pub const PROBABILITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;

/// Impact bounds for a risk (inclusive)
pub const IMPACT_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid date format: '{0}' (expected DD/MM/YYYY)")]
    InvalidDateFormat(String),

    #[error("Start date {} is after end date {}", display_date(.start), display_date(.end))]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid risk parameters: probability '{probability}' must be in [0, 1] and impact '{impact}' in [1, 10]")]
    InvalidRiskParameters { probability: String, impact: String },
}

fn display_date(date: &NaiveDate) -> String {
    format_date(*date)
}

/// Parses and checks a start/end pair
pub fn validate_date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    if start > end {
        return Err(ValidationError::InvalidDateRange { start, end });
    }

    Ok((start, end))
}

/// Parses risk probability and impact
///
/// Both values are trimmed before parsing. Any parse failure or out-of-range
/// value produces the same combined error.
pub fn validate_risk(probability: &str, impact: &str) -> Result<(f64, u8), ValidationError> {
    let invalid = || ValidationError::InvalidRiskParameters {
        probability: probability.to_string(),
        impact: impact.to_string(),
    };

    let p: f64 = probability.trim().parse().map_err(|_| invalid())?;
    let i: i64 = impact.trim().parse().map_err(|_| invalid())?;

    if !PROBABILITY_RANGE.contains(&p) {
        return Err(invalid());
    }

    let i = u8::try_from(i).map_err(|_| invalid())?;
    if !IMPACT_RANGE.contains(&i) {
        return Err(invalid());
    }

    Ok((p, i))
}
