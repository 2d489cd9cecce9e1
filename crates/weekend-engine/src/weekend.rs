//! Weekend resolution: map any timestamp to the weekend that contains it.
//!
//! A weekend is a three-day calendar span that starts on the anchor weekday
//! (Friday unless configured otherwise) and ends two days later. Every
//! timestamp whose calendar date falls inside the same span resolves to the
//! same [`WeekendWindow`], which is what lets events, votes and weekend
//! options collapse onto one planning bucket.
//!
//! All functions here are pure: no clock, no I/O, no shared state. Input that
//! cannot be read as a calendar date is an error, never a guessed date.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeekendError};

/// Number of calendar days in a weekend window, anchor day included.
pub const WEEKEND_SPAN_DAYS: u64 = 3;

/// Date-time layouts accepted without an offset. Fractional seconds are optional.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset layouts RFC 3339 parsing rejects: minute precision, space separator,
/// and `±HH` / `±HHMM` offsets (Postgres writes `timestamptz` as `...+00`).
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

// ── Anchor & options ────────────────────────────────────────────────────────

/// The weekday a weekend window starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekendAnchor {
    /// Thursday..Saturday, for groups that leave on Thursday night.
    Thursday,
    /// Friday..Sunday.
    #[default]
    Friday,
    /// Saturday..Monday, for long weekends ending on a holiday Monday.
    Saturday,
}

impl WeekendAnchor {
    /// The chrono weekday of the first day of the window.
    pub fn weekday(self) -> Weekday {
        match self {
            WeekendAnchor::Thursday => Weekday::Thu,
            WeekendAnchor::Friday => Weekday::Fri,
            WeekendAnchor::Saturday => Weekday::Sat,
        }
    }
}

impl FromStr for WeekendAnchor {
    type Err = WeekendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "thursday" | "thu" | "thurs" => Ok(WeekendAnchor::Thursday),
            "friday" | "fri" => Ok(WeekendAnchor::Friday),
            "saturday" | "sat" => Ok(WeekendAnchor::Saturday),
            _ => Err(WeekendError::InvalidAnchor(format!(
                "'{}' (expected thursday, friday or saturday)",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for WeekendAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeekendAnchor::Thursday => "thursday",
            WeekendAnchor::Friday => "friday",
            WeekendAnchor::Saturday => "saturday",
        };
        f.write_str(name)
    }
}

/// Options for [`resolve_weekend_with_options`] and the bucketing helpers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekendOptions {
    /// Which weekday starts the window.
    pub anchor: WeekendAnchor,
    /// Zone used to read the calendar date of timestamps that carry an
    /// explicit offset. `None` keeps the wall-clock date written in the input.
    pub timezone: Option<Tz>,
}

impl WeekendOptions {
    /// Set the weekday windows start on.
    pub fn with_anchor(mut self, anchor: WeekendAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the calendar zone from an IANA name (e.g. `"America/Denver"`).
    ///
    /// # Errors
    ///
    /// Returns [`WeekendError::InvalidTimezone`] for unknown zone names.
    pub fn with_timezone(mut self, timezone: &str) -> Result<Self> {
        self.timezone = Some(parse_timezone(timezone)?);
        Ok(self)
    }
}

// ── WeekendWindow ───────────────────────────────────────────────────────────

/// A weekend: `start` is always the anchor weekday and `end` is `start + 2 days`.
///
/// Windows are plain values. Two windows built from timestamps in the same
/// weekend compare equal and hash identically, so they can key maps directly.
/// Serialized as `{"weekendStart": "YYYY-MM-DD", "weekendEnd": "YYYY-MM-DD"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WeekendWindow {
    #[serde(rename = "weekendStart")]
    start: NaiveDate,
    #[serde(rename = "weekendEnd")]
    end: NaiveDate,
}

impl WeekendWindow {
    /// First day of the weekend (the anchor weekday).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the weekend.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` is one of the weekend's days.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The calendar dates of the weekend, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(WEEKEND_SPAN_DAYS as usize)
    }

    /// The same weekend one week later, or `None` past the end of the calendar.
    pub fn next(&self) -> Option<WeekendWindow> {
        Some(WeekendWindow {
            start: self.start.checked_add_days(Days::new(7))?,
            end: self.end.checked_add_days(Days::new(7))?,
        })
    }

    /// The same weekend one week earlier.
    pub fn previous(&self) -> Option<WeekendWindow> {
        Some(WeekendWindow {
            start: self.start.checked_sub_days(Days::new(7))?,
            end: self.end.checked_sub_days(Days::new(7))?,
        })
    }
}

impl fmt::Display for WeekendWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Resolve a timestamp to the Friday..Sunday weekend containing it.
///
/// Uses the default [`WeekendOptions`]: Friday anchor, calendar date taken
/// as written in the input. See [`resolve_weekend_with_options`].
///
/// # Errors
///
/// Returns [`WeekendError::Parse`] if the input is not an ISO 8601 date or
/// date-time.
///
/// # Examples
///
/// ```
/// use weekend_engine::resolve_weekend;
///
/// let saturday = resolve_weekend("2025-06-14T19:00:00Z").unwrap();
/// let sunday = resolve_weekend("2025-06-15T13:00:00Z").unwrap();
/// assert_eq!(saturday, sunday);
/// assert_eq!(saturday.to_string(), "2025-06-13..2025-06-15");
/// ```
pub fn resolve_weekend(timestamp: &str) -> Result<WeekendWindow> {
    resolve_weekend_with_options(timestamp, &WeekendOptions::default())
}

/// Resolve a timestamp to its weekend window with explicit options.
///
/// # Accepted Input
///
/// - Date only: `"2025-06-13"`
/// - RFC 3339 date-time: `"2025-06-13T19:00:00Z"`, `"2025-06-13 19:00:00.250-05:00"`
/// - Minute precision: `"2025-06-13T19:00Z"`, `"2025-06-13T19:00+02:00"`
/// - Short offsets: `"2025-06-13T19:00:00+0200"`, `"2025-06-13 19:00:00+00"`
/// - No offset: `"2025-06-13T19:00:00"`, `"2025-06-13 19:00"`
///
/// Time of day only matters for picking the calendar date. When
/// `options.timezone` is set, inputs with an offset are converted to that
/// zone first; everything else is read as written.
///
/// The window starts on the most recent anchor day on or before the date.
///
/// # Errors
///
/// Returns [`WeekendError::Parse`] for empty, malformed or out-of-range input.
pub fn resolve_weekend_with_options(
    timestamp: &str,
    options: &WeekendOptions,
) -> Result<WeekendWindow> {
    let date = parse_calendar_date(timestamp, options.timezone.as_ref())?;
    weekend_containing(date, options.anchor)
}

/// Compute the weekend window for an already-parsed calendar date.
///
/// # Errors
///
/// Returns [`WeekendError::Parse`] only when the window would fall outside
/// the representable calendar.
pub fn weekend_containing(date: NaiveDate, anchor: WeekendAnchor) -> Result<WeekendWindow> {
    let out_of_range = || WeekendError::Parse(format!("'{date}' is out of the supported range"));

    let start = date
        .checked_sub_days(Days::new(days_since_anchor(date.weekday(), anchor)))
        .ok_or_else(out_of_range)?;
    let end = start
        .checked_add_days(Days::new(WEEKEND_SPAN_DAYS - 1))
        .ok_or_else(out_of_range)?;

    Ok(WeekendWindow { start, end })
}

/// How many days `weekday` is past the anchor day (0..=6).
fn days_since_anchor(weekday: Weekday, anchor: WeekendAnchor) -> u64 {
    let day = u64::from(weekday.num_days_from_monday());
    let anchor_day = u64::from(anchor.weekday().num_days_from_monday());
    (day + 7 - anchor_day) % 7
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| WeekendError::InvalidTimezone(format!("'{}'", s.trim())))
}

/// Read the calendar date out of a date or date-time string.
pub(crate) fn parse_calendar_date(timestamp: &str, timezone: Option<&Tz>) -> Result<NaiveDate> {
    let s = timestamp.trim();
    if s.is_empty() {
        return Err(WeekendError::Parse("empty timestamp".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Some(dt) = parse_offset_datetime(s) {
        return Ok(match timezone {
            Some(tz) => dt.with_timezone(tz).date_naive(),
            None => dt.date_naive(),
        });
    }

    if let Some(naive) = parse_naive_datetime(s) {
        return Ok(naive.date());
    }

    Err(WeekendError::Parse(format!(
        "'{s}' is not an ISO 8601 date or date-time"
    )))
}

fn parse_offset_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    // "2025-06-13T19:00Z": UTC designator without seconds
    if let Some(naive) = s.strip_suffix(['Z', 'z']).and_then(parse_naive_datetime) {
        return Some(naive.and_utc().fixed_offset());
    }

    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(s, format).ok())
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        // 1900-01-01 plus up to ~550 years
        (0u64..200_000).prop_map(|days| {
            NaiveDate::from_ymd_opt(1900, 1, 1)
                .unwrap()
                .checked_add_days(Days::new(days))
                .unwrap()
        })
    }

    fn arb_anchor() -> impl Strategy<Value = WeekendAnchor> {
        prop_oneof![
            Just(WeekendAnchor::Thursday),
            Just(WeekendAnchor::Friday),
            Just(WeekendAnchor::Saturday),
        ]
    }

    fn arb_timestamp() -> impl Strategy<Value = String> {
        (arb_date(), 0u32..24, 0u32..60, 0u32..60, -12i32..=14).prop_map(
            |(d, h, m, s, offset)| {
                let sign = if offset < 0 { '-' } else { '+' };
                format!(
                    "{}T{:02}:{:02}:{:02}{}{:02}:00",
                    d.format("%Y-%m-%d"),
                    h,
                    m,
                    s,
                    sign,
                    offset.unsigned_abs()
                )
            },
        )
    }

    proptest! {
        #[test]
        fn end_is_start_plus_two_days(ts in arb_timestamp()) {
            let w = resolve_weekend(&ts).unwrap();
            prop_assert_eq!(w.end(), w.start().checked_add_days(Days::new(2)).unwrap());
        }

        #[test]
        fn start_is_always_friday(ts in arb_timestamp()) {
            let w = resolve_weekend(&ts).unwrap();
            prop_assert_eq!(w.start().weekday(), Weekday::Fri);
        }

        #[test]
        fn start_is_the_configured_anchor(d in arb_date(), anchor in arb_anchor()) {
            let w = weekend_containing(d, anchor).unwrap();
            prop_assert_eq!(w.start().weekday(), anchor.weekday());
            prop_assert!(w.start() <= d);
            prop_assert!(d - w.start() < chrono::Duration::days(7));
        }

        #[test]
        fn weekend_dates_are_contained(d in arb_date()) {
            let w = weekend_containing(d, WeekendAnchor::Friday).unwrap();
            let is_weekend = matches!(d.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun);
            prop_assert_eq!(w.contains(d), is_weekend);
        }

        #[test]
        fn every_day_of_a_window_resolves_to_it(d in arb_date()) {
            let w = weekend_containing(d, WeekendAnchor::Friday).unwrap();
            for day in w.dates() {
                prop_assert_eq!(weekend_containing(day, WeekendAnchor::Friday).unwrap(), w);
            }
        }

        #[test]
        fn time_of_day_does_not_change_the_window(d in arb_date(), h in 0u32..24, m in 0u32..60) {
            let date_only = resolve_weekend(&d.format("%Y-%m-%d").to_string()).unwrap();
            let with_time =
                resolve_weekend(&format!("{}T{:02}:{:02}:00", d.format("%Y-%m-%d"), h, m)).unwrap();
            prop_assert_eq!(date_only, with_time);
        }

        #[test]
        fn resolution_is_deterministic(ts in arb_timestamp()) {
            let a = serde_json::to_string(&resolve_weekend(&ts).unwrap()).unwrap();
            let b = serde_json::to_string(&resolve_weekend(&ts).unwrap()).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn garbage_never_panics(s in "\\PC{0,40}") {
            let _ = resolve_weekend(&s);
        }
    }
}
