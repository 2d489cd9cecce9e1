//! Candidate weekend generation for a trip's weekend options.
//!
//! A window qualifies when it overlaps the requested dates, so a weekend that
//! is already in progress on the first day is still offered.

use chrono::NaiveDate;

use crate::error::{Result, WeekendError};
use crate::weekend::{parse_calendar_date, weekend_containing, WeekendOptions, WeekendWindow};

/// Upper bound on windows produced by one call (two years of weekends).
pub const MAX_WEEKEND_OPTIONS: usize = 104;

/// Every weekend window overlapping `start..=end`, in calendar order.
///
/// # Errors
///
/// Returns [`WeekendError::Parse`] if either bound is not a date,
/// [`WeekendError::InvalidRange`] if `end` is before `start` or the range
/// spans more than [`MAX_WEEKEND_OPTIONS`] weekends.
pub fn weekends_between(
    start: &str,
    end: &str,
    options: &WeekendOptions,
) -> Result<Vec<WeekendWindow>> {
    let start_date = parse_calendar_date(start, options.timezone.as_ref())?;
    let end_date = parse_calendar_date(end, options.timezone.as_ref())?;

    if end_date < start_date {
        return Err(WeekendError::InvalidRange(format!(
            "end '{end_date}' is before start '{start_date}'"
        )));
    }

    let windows: Vec<WeekendWindow> =
        std::iter::successors(Some(first_overlapping(start_date, options)?), |w| w.next())
            .take_while(|w| w.start() <= end_date)
            .take(MAX_WEEKEND_OPTIONS + 1)
            .collect();

    if windows.len() > MAX_WEEKEND_OPTIONS {
        return Err(WeekendError::InvalidRange(format!(
            "'{start_date}'..'{end_date}' spans more than {MAX_WEEKEND_OPTIONS} weekends"
        )));
    }

    Ok(windows)
}

/// The next `count` weekend windows, starting with the one in progress on `from`.
///
/// # Errors
///
/// Returns [`WeekendError::Parse`] if `from` is not a date, or
/// [`WeekendError::InvalidRange`] if `count` exceeds [`MAX_WEEKEND_OPTIONS`].
pub fn upcoming_weekends(
    from: &str,
    count: usize,
    options: &WeekendOptions,
) -> Result<Vec<WeekendWindow>> {
    if count > MAX_WEEKEND_OPTIONS {
        return Err(WeekendError::InvalidRange(format!(
            "requested {count} weekends, at most {MAX_WEEKEND_OPTIONS} allowed"
        )));
    }

    let from_date = parse_calendar_date(from, options.timezone.as_ref())?;
    let first = first_overlapping(from_date, options)?;

    Ok(std::iter::successors(Some(first), |w| w.next())
        .take(count)
        .collect())
}

/// The window containing `date`, or the following one when `date` falls
/// between weekends.
fn first_overlapping(date: NaiveDate, options: &WeekendOptions) -> Result<WeekendWindow> {
    let window = weekend_containing(date, options.anchor)?;
    if window.end() >= date {
        return Ok(window);
    }
    window.next().ok_or_else(|| {
        WeekendError::InvalidRange(format!("no weekend after '{date}' in the calendar"))
    })
}
