//! Time-of-day values.
//!
//! Events stored by the backend carry their time as a bare `HH:MM` (or
//! `HH:MM:SS`) string. [`TimeOfDay`] is the parsed, range-checked form of
//! such a string and the unit the window engine reasons in.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// A wall-clock time of day with minute precision.
///
/// Serializes as the zero-padded `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a time of day, returning `None` when out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < MINUTES_PER_HOUR).then_some(Self { hour, minute })
    }

    /// Creates a time of day from minutes past midnight.
    ///
    /// Values past the end of the day wrap around.
    pub fn from_minute_of_day(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: minutes / MINUTES_PER_HOUR,
            minute: minutes % MINUTES_PER_HOUR,
        }
    }

    /// Parses `HH:MM` or `HH:MM:SS`.
    ///
    /// Surrounding whitespace is ignored and the hour may be a single digit.
    /// Seconds are validated but discarded. Returns `None` for anything that
    /// is not a valid time of day, including out-of-range values such as
    /// `"25:99"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split(':');
        let hour = parse_component(parts.next()?)?;
        let minute = parse_component(parts.next()?)?;
        if let Some(seconds) = parts.next() {
            if parse_component(seconds)? >= 60 {
                return None;
            }
        }
        if parts.next().is_some() {
            return None;
        }
        Self::new(hour, minute)
    }

    /// The hour, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// The minute within the hour, `0..=59`.
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes past midnight, `0..1440`.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * MINUTES_PER_HOUR + self.minute
    }

    /// Converts to a [`NaiveTime`] with zero seconds.
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid time of day: {value:?}"))
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// Parses one numeric component: one or two ASCII digits.
fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
