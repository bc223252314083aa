//! Display formatting for times of day and civil dates.
//!
//! Organizations choose between a 12-hour and a 24-hour clock and one of a
//! handful of date patterns. Everything rendered for people goes through
//! [`format_clock`] and [`format_date`] so that agenda slot labels and
//! timestamp strings always agree.
//!
//! # Example
//!
//! ```rust
//! use studioagenda_core::format::{format_clock, TimeFormat};
//!
//! assert_eq!(format_clock(0, 0, TimeFormat::H12), "12:00 AM");
//! assert_eq!(format_clock(14, 30, TimeFormat::H12), "2:30 PM");
//! assert_eq!(format_clock(9, 5, TimeFormat::H24), "09:05");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    #[serde(rename = "24-hour", alias = "24h")]
    H24,
    /// 12-hour format with AM/PM (e.g., "2:30 PM").
    #[serde(rename = "12-hour", alias = "12h")]
    H12,
}

impl TimeFormat {
    /// Returns the canonical setting value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H24 => "24-hour",
            Self::H12 => "12-hour",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24-hour" | "24h" | "24" => Ok(Self::H24),
            "12-hour" | "12h" | "12" => Ok(Self::H12),
            _ => Err(SettingsError::invalid_time_format(s)),
        }
    }
}

/// Date pattern preference.
///
/// Serialized as the pattern itself, e.g. `"DD/MM/YYYY"`. Deserialization is
/// lenient: case is ignored and unknown patterns become the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DateFormat {
    /// `MM/DD/YYYY`
    #[default]
    MonthDayYearSlash,
    /// `DD/MM/YYYY`
    DayMonthYearSlash,
    /// `YYYY-MM-DD`
    Iso,
    /// `MM-DD-YYYY`
    MonthDayYearDash,
    /// `DD-MM-YYYY`
    DayMonthYearDash,
}

impl DateFormat {
    /// All supported patterns.
    pub const ALL: [DateFormat; 5] = [
        Self::MonthDayYearSlash,
        Self::DayMonthYearSlash,
        Self::Iso,
        Self::MonthDayYearDash,
        Self::DayMonthYearDash,
    ];

    /// Returns the pattern string.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::MonthDayYearSlash => "MM/DD/YYYY",
            Self::DayMonthYearSlash => "DD/MM/YYYY",
            Self::Iso => "YYYY-MM-DD",
            Self::MonthDayYearDash => "MM-DD-YYYY",
            Self::DayMonthYearDash => "DD-MM-YYYY",
        }
    }

    /// Parses a pattern, falling back to the default for unknown values.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl From<String> for DateFormat {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<DateFormat> for String {
    fn from(f: DateFormat) -> Self {
        f.pattern().to_string()
    }
}

impl FromStr for DateFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|f| f.pattern() == wanted)
            .ok_or_else(|| SettingsError::invalid_date_format(s))
    }
}

/// Options for rendering a full civil date and time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeFormatOptions {
    /// Date pattern.
    pub date_format: DateFormat,
    /// 12/24-hour preference for the time part.
    pub time_format: TimeFormat,
}

impl DateTimeFormatOptions {
    /// Creates options from both preferences.
    pub fn new(date_format: DateFormat, time_format: TimeFormat) -> Self {
        Self {
            date_format,
            time_format,
        }
    }
}

/// Formats an hour and minute as a clock label.
///
/// 24-hour: zero-padded `HH:MM`. 12-hour: `H:MM AM/PM`, where hour 0 is
/// shown as 12 (midnight is `12:00 AM`, noon is `12:00 PM`).
pub fn format_clock(hour: u32, minute: u32, format: TimeFormat) -> String {
    match format {
        TimeFormat::H24 => format!("{:02}:{:02}", hour, minute),
        TimeFormat::H12 => {
            let period = if hour < 12 { "AM" } else { "PM" };
            let display_hour = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{}:{:02} {}", display_hour, minute, period)
        }
    }
}

/// Formats a calendar date with the given pattern.
pub fn format_date(date: NaiveDate, format: DateFormat) -> String {
    let (y, m, d) = (date.year(), date.month(), date.day());
    match format {
        DateFormat::MonthDayYearSlash => format!("{:02}/{:02}/{:04}", m, d, y),
        DateFormat::DayMonthYearSlash => format!("{:02}/{:02}/{:04}", d, m, y),
        DateFormat::Iso => format!("{:04}-{:02}-{:02}", y, m, d),
        DateFormat::MonthDayYearDash => format!("{:02}-{:02}-{:04}", m, d, y),
        DateFormat::DayMonthYearDash => format!("{:02}-{:02}-{:04}", d, m, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod clock {
        use super::*;

        #[test]
        fn twenty_four_hour() {
            assert_eq!(format_clock(0, 0, TimeFormat::H24), "00:00");
            assert_eq!(format_clock(7, 30, TimeFormat::H24), "07:30");
            assert_eq!(format_clock(23, 30, TimeFormat::H24), "23:30");
        }

        #[test]
        fn twelve_hour_midnight_and_noon() {
            assert_eq!(format_clock(0, 0, TimeFormat::H12), "12:00 AM");
            assert_eq!(format_clock(12, 0, TimeFormat::H12), "12:00 PM");
        }

        #[test]
        fn twelve_hour_regular() {
            assert_eq!(format_clock(0, 30, TimeFormat::H12), "12:30 AM");
            assert_eq!(format_clock(9, 5, TimeFormat::H12), "9:05 AM");
            assert_eq!(format_clock(13, 0, TimeFormat::H12), "1:00 PM");
            assert_eq!(format_clock(23, 30, TimeFormat::H12), "11:30 PM");
        }
    }

    mod time_format {
        use super::*;

        #[test]
        fn from_str_variants() {
            assert_eq!("12-hour".parse::<TimeFormat>().unwrap(), TimeFormat::H12);
            assert_eq!("12h".parse::<TimeFormat>().unwrap(), TimeFormat::H12);
            assert_eq!(" 24-Hour ".parse::<TimeFormat>().unwrap(), TimeFormat::H24);
            assert!("military".parse::<TimeFormat>().is_err());
        }

        #[test]
        fn serde_names() {
            assert_eq!(serde_json::to_string(&TimeFormat::H12).unwrap(), "\"12-hour\"");
            let parsed: TimeFormat = serde_json::from_str("\"24h\"").unwrap();
            assert_eq!(parsed, TimeFormat::H24);
        }
    }

    mod date_format {
        use super::*;

        #[test]
        fn every_pattern() {
            let d = date(2025, 2, 5);
            assert_eq!(format_date(d, DateFormat::MonthDayYearSlash), "02/05/2025");
            assert_eq!(format_date(d, DateFormat::DayMonthYearSlash), "05/02/2025");
            assert_eq!(format_date(d, DateFormat::Iso), "2025-02-05");
            assert_eq!(format_date(d, DateFormat::MonthDayYearDash), "02-05-2025");
            assert_eq!(format_date(d, DateFormat::DayMonthYearDash), "05-02-2025");
        }

        #[test]
        fn pattern_roundtrip() {
            for f in DateFormat::ALL {
                assert_eq!(f.pattern().parse::<DateFormat>().unwrap(), f);
            }
        }

        #[test]
        fn lenient_parse_falls_back() {
            assert_eq!(DateFormat::parse_lenient("dd/mm/yyyy"), DateFormat::DayMonthYearSlash);
            assert_eq!(DateFormat::parse_lenient("YYYY.MM.DD"), DateFormat::default());
        }

        #[test]
        fn serde_uses_pattern() {
            assert_eq!(serde_json::to_string(&DateFormat::Iso).unwrap(), "\"YYYY-MM-DD\"");
        }

        #[test]
        fn deserialize_is_lenient() {
            let lower: DateFormat = serde_json::from_str("\"dd/mm/yyyy\"").unwrap();
            assert_eq!(lower, DateFormat::DayMonthYearSlash);
            let unknown: DateFormat = serde_json::from_str("\"YYYY.MM.DD\"").unwrap();
            assert_eq!(unknown, DateFormat::MonthDayYearSlash);
        }
    }
}
