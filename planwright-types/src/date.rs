//! Reference-time timestamps for the planning network.
//!
//! A [`PlanDate`] is a calendar date and time with one-second precision.
//! It is not a clock: the plan's "now" only moves when it is explicitly
//! set, forward or backward.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const ACCEPTED_FORMATS: [&str; 2] = [DATETIME_FORMAT, "%Y-%m-%d %H:%M:%S"];

/// A timestamp with at least day granularity, used as the plan's
/// reference time.
///
/// Text form is `YYYY-MM-DDTHH:MM:SS`. Parsing also accepts a space
/// between date and time, or a bare `YYYY-MM-DD` (midnight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanDate(NaiveDateTime);

impl PlanDate {
    /// The local wall-clock time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    /// Wraps a chrono datetime, dropping sub-second precision.
    #[must_use]
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// Midnight at the start of the given day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// Creates a timestamp from calendar components.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .map(Self)
            .ok_or_else(|| {
                Error::InvalidDate(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"
                ))
            })
    }

    /// The earliest date the planning network reasons about.
    #[must_use]
    pub fn infinite_past() -> Self {
        Self::epoch(1971)
    }

    /// The latest date the planning network reasons about.
    #[must_use]
    pub fn infinite_future() -> Self {
        Self::epoch(2031) - TimeDelta::seconds(1)
    }

    fn epoch(year: i32) -> Self {
        Self(
            NaiveDate::from_yo_opt(year, 1)
                .unwrap_or(NaiveDate::MIN)
                .and_time(chrono::NaiveTime::MIN),
        )
    }

    /// Returns the underlying chrono datetime.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Returns the calendar day of this timestamp.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Shifts the timestamp by a number of days (negative moves backward).
    ///
    /// Returns `None` when the result falls outside chrono's range.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Option<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    /// Shifts the timestamp by `delta`, or `None` outside chrono's range.
    #[must_use]
    pub fn checked_add(&self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Shifts the timestamp back by `delta`, or `None` outside chrono's range.
    #[must_use]
    pub fn checked_sub(&self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_sub_signed(delta).map(Self)
    }

    /// Whole days from `self` to `other` (negative if `other` is earlier).
    #[must_use]
    pub fn days_until(&self, other: &Self) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns true if this date is strictly before the other.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }
}

impl Default for PlanDate {
    fn default() -> Self {
        Self::now()
    }
}

/// # Panics
///
/// Panics if the result falls outside chrono's range; use
/// [`PlanDate::checked_sub`] for untrusted offsets.
impl std::ops::Sub<TimeDelta> for PlanDate {
    type Output = Self;

    fn sub(self, rhs: TimeDelta) -> Self {
        Self(self.0 - rhs)
    }
}

/// # Panics
///
/// Panics if the result falls outside chrono's range; use
/// [`PlanDate::checked_add`] or [`PlanDate::add_days`] for untrusted
/// offsets.
impl std::ops::Add<TimeDelta> for PlanDate {
    type Output = Self;

    fn add(self, rhs: TimeDelta) -> Self {
        Self(self.0 + rhs)
    }
}

impl fmt::Display for PlanDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATETIME_FORMAT))
    }
}

impl FromStr for PlanDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        for format in ACCEPTED_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(datetime));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|d| Self(d.and_time(chrono::NaiveTime::MIN)))
            .map_err(|_| Error::InvalidDate(s.to_string()))
    }
}

impl Serialize for PlanDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlanDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
