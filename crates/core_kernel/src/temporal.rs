//! Calendar date handling for NAV series
//!
//! This module provides the date arithmetic the returns engine relies on:
//! - Parsing of upstream (`dd-mm-yyyy`) and ISO (`yyyy-mm-dd`) dates
//! - Calendar month shifting with day-of-month rollover
//! - Elapsed-time helpers in whole days and fractional years

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Average year length used to convert elapsed days into years
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Date format used by the upstream NAV source
pub const UPSTREAM_DATE_FORMAT: &str = "%d-%m-%Y";

/// ISO calendar date format
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },
}

/// Parses a calendar date in either the upstream or the ISO format
///
/// # Arguments
///
/// * `value` - A date such as `"15-01-2024"` or `"2024-01-15"`
///
/// # Example
///
/// ```rust
/// use core_kernel::temporal::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let upstream = parse_calendar_date("15-01-2024").unwrap();
/// let iso = parse_calendar_date("2024-01-15").unwrap();
/// assert_eq!(upstream, iso);
/// assert_eq!(iso, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// ```
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, UPSTREAM_DATE_FORMAT))
        .map_err(|_| TemporalError::InvalidDate(value.to_string()))
}

/// Shifts a date by a number of calendar months, keeping the day of month
///
/// When the target month is shorter than the day of month, the surplus days
/// roll over into the following month instead of clamping:
///
/// - 2021-01-31 + 1 month = 2021-03-03
/// - 2020-01-31 + 1 month = 2020-03-02
/// - 2024-03-31 - 1 month = 2024-03-02
///
/// Repeated shifts therefore drift: a monthly schedule starting on the 31st
/// continues on the 3rd once it has passed February.
///
/// Returns `None` if the result falls outside chrono's supported range.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = date.year().checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(months)?;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(date.day0())))
}

/// Whole days between two dates, regardless of their order
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Elapsed years between two dates, regardless of their order
///
/// Uses a 365.25-day year.
pub fn years_between(a: NaiveDate, b: NaiveDate) -> f64 {
    days_between(a, b) as f64 / DAYS_PER_YEAR
}

/// An inclusive range of calendar dates, start never after end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both ends with [`parse_calendar_date`]
    pub fn parse(start: &str, end: &str) -> Result<Self, TemporalError> {
        Self::new(parse_calendar_date(start)?, parse_calendar_date(end)?)
    }
}
