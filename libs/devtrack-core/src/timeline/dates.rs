//! Calendar arithmetic behind the timeline grid
//!
//! Weeks start on Monday. Month shifts keep the day of month when the target
//! month has it and otherwise clamp to the target month's last day, so
//! Jan 31 + 1 month is Feb 28 (or Feb 29 in leap years).

use crate::error::{Result, TrackerError};
use chrono::{Datelike, Duration, NaiveDate};

/// Add days to a date with overflow checking
///
/// # Errors
/// Returns `TrackerError::InvalidDate` if the result leaves chrono's range
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| TrackerError::invalid_date(date, format!("cannot shift by {days} days")))
}

/// Number of days in `month` of `year`, or `None` for an invalid month
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next_first.signed_duration_since(first).num_days()).ok()
}

/// Monday of the week containing `date`
///
/// # Errors
/// Returns `TrackerError::InvalidDate` near the lower bound of chrono's range
pub fn week_start(date: NaiveDate) -> Result<NaiveDate> {
    add_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Inclusive Monday–Sunday bounds of the week containing `date`
///
/// # Errors
/// Returns `TrackerError::InvalidDate` near either bound of chrono's range
pub fn week_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let start = week_start(date)?;
    Ok((start, add_days(start, 6)?))
}

/// Inclusive first/last-day bounds of the month containing `date`
///
/// # Errors
/// Returns `TrackerError::InvalidDate` if the month cannot be represented
pub fn month_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || TrackerError::invalid_date(date, "month bounds out of range");
    let last_day = days_in_month(date.year(), date.month()).ok_or_else(invalid)?;
    let start = date.with_day(1).ok_or_else(invalid)?;
    let end = date.with_day(last_day).ok_or_else(invalid)?;
    Ok((start, end))
}

/// Shift `date` by whole months, clamping to the end of shorter months
///
/// # Errors
/// Returns `TrackerError::InvalidDate` if the target year leaves chrono's range
pub fn shift_months(date: NaiveDate, months: i32) -> Result<NaiveDate> {
    let invalid = || TrackerError::invalid_date(date, format!("cannot shift by {months} months"));

    let month_index = date.year() * 12 + date.month0() as i32;
    let target = month_index.checked_add(months).ok_or_else(invalid)?;
    let year = target.div_euclid(12);
    #[allow(clippy::cast_sign_loss)]
    let month = target.rem_euclid(12) as u32 + 1;

    let last_day = days_in_month(year, month).ok_or_else(invalid)?;
    NaiveDate::from_ymd_opt(year, month, date.day().min(last_day)).ok_or_else(invalid)
}

/// Every date from `start` to `end` inclusive, ascending; empty if `end < start`
#[must_use]
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
