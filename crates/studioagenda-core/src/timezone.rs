//! Organization timezone normalization.
//!
//! Timestamps are stored in UTC. Everything shown to people (and the "now"
//! that the agenda window centers on) is expressed in the organization's
//! configured timezone instead of the machine's. [`TimezoneNormalizer`] owns
//! that conversion and the rendering rules that go with it.
//!
//! Resolution never fails: an unknown organization zone falls back to the
//! system zone, and an undetectable system zone falls back to UTC.

use std::path::Path;

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::format::{DateTimeFormatOptions, TimeFormat, format_clock, format_date};
use crate::settings::OrganizationSettings;
use crate::time::TimeOfDay;

const TIMEZONE_ENV_VAR: &str = "TZ";
const LOCALTIME_PATH: &str = "/etc/localtime";
const ZONEINFO_MARKER: &str = "zoneinfo/";

/// How far back to look for the offset in effect before a DST gap.
const GAP_PROBE_HOURS: i64 = 24;

/// Where the effective timezone came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneSource {
    /// The organization's configured zone.
    Organization,
    /// The host system's zone.
    System,
    /// Nothing could be resolved.
    Utc,
}

/// A time to render: either an absolute instant or a stored bare time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInput<'a> {
    /// An absolute instant, converted to civil time before rendering.
    Instant(DateTime<Utc>),
    /// A bare `HH:MM[:SS]` string, rendered without conversion.
    Bare(&'a str),
}

impl From<DateTime<Utc>> for TimeInput<'_> {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt)
    }
}

impl<'a> From<&'a str> for TimeInput<'a> {
    fn from(s: &'a str) -> Self {
        Self::Bare(s)
    }
}

/// Converts between UTC storage and an organization's civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneNormalizer {
    tz: Tz,
    source: TimezoneSource,
}

impl Default for TimezoneNormalizer {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimezoneNormalizer {
    /// Creates a normalizer for an explicitly chosen zone.
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            source: TimezoneSource::Organization,
        }
    }

    /// Creates a normalizer that works in UTC.
    pub fn utc() -> Self {
        Self {
            tz: chrono_tz::UTC,
            source: TimezoneSource::Utc,
        }
    }

    /// Resolves the organization zone, falling back to the system zone and
    /// then UTC.
    pub fn resolve(configured: Option<&str>) -> Self {
        Self::resolve_with(configured, detect_system_timezone)
    }

    /// Builds a normalizer from organization settings.
    pub fn from_settings(settings: &OrganizationSettings) -> Self {
        Self::resolve(settings.timezone.as_deref())
    }

    /// Like [`resolve`](Self::resolve) with an injected system-zone lookup.
    pub fn resolve_with<F>(configured: Option<&str>, system: F) -> Self
    where
        F: FnOnce() -> Option<Tz>,
    {
        if let Some(raw) = configured.map(str::trim).filter(|s| !s.is_empty()) {
            match raw.parse::<Tz>() {
                Ok(tz) => return Self::new(tz),
                Err(_) => {
                    tracing::warn!(timezone = %raw, "unknown organization timezone");
                }
            }
        }

        if let Some(tz) = system() {
            tracing::debug!(timezone = %tz.name(), "using system timezone");
            return Self {
                tz,
                source: TimezoneSource::System,
            };
        }

        tracing::debug!("no timezone detected; using UTC");
        Self::utc()
    }

    /// The effective zone.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The IANA name of the effective zone.
    pub fn timezone_name(&self) -> &'static str {
        self.tz.name()
    }

    /// Where the effective zone came from.
    pub fn source(&self) -> TimezoneSource {
        self.source
    }

    /// Returns "now" as civil time in the organization's zone.
    pub fn current_civil_time(&self) -> NaiveDateTime {
        self.civil_time_at(Utc::now())
    }

    /// Returns the civil time in the organization's zone at `instant`.
    pub fn civil_time_at(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        self.to_civil(instant)
    }

    /// Returns the organization's current time of day.
    pub fn current_time_of_day(&self) -> TimeOfDay {
        self.time_of_day_at(Utc::now())
    }

    /// Returns the organization's time of day at `instant`.
    pub fn time_of_day_at(&self, instant: DateTime<Utc>) -> TimeOfDay {
        TimeOfDay::from(self.to_civil(instant).time())
    }

    /// Converts an absolute instant to civil time.
    pub fn to_civil(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// Converts civil time back to an absolute instant.
    ///
    /// Ambiguous civil times (DST fall-back) map to the earlier instant.
    /// Civil times inside a DST gap are read with the offset in effect
    /// before the gap.
    pub fn from_civil(&self, civil: NaiveDateTime) -> DateTime<Utc> {
        match self.tz.from_local_datetime(&civil) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                let probe = civil - Duration::hours(GAP_PROBE_HOURS);
                let offset = self.tz.offset_from_utc_datetime(&probe).fix();
                (civil - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
            }
        }
    }

    /// Returns the civil date at `instant`.
    pub fn civil_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_civil(instant).date()
    }

    /// Returns the civil date at `instant` as a `YYYY-MM-DD` key.
    pub fn civil_date_key(&self, instant: DateTime<Utc>) -> String {
        self.civil_date(instant).format("%Y-%m-%d").to_string()
    }

    /// Renders a time of day.
    ///
    /// Instants are converted to civil time first. Bare strings that cannot
    /// be parsed are returned trimmed but otherwise unchanged.
    pub fn format_time_of_day<'a>(&self, input: impl Into<TimeInput<'a>>, format: TimeFormat) -> String {
        match input.into() {
            TimeInput::Instant(instant) => {
                let t = self.time_of_day_at(instant);
                format_clock(t.hour(), t.minute(), format)
            }
            TimeInput::Bare(raw) => match TimeOfDay::parse(raw) {
                Some(t) => format_clock(t.hour(), t.minute(), format),
                None => raw.trim().to_string(),
            },
        }
    }

    /// Renders an instant as `<date> <time>` in civil time.
    pub fn format_civil_date_time(&self, instant: DateTime<Utc>, options: DateTimeFormatOptions) -> String {
        let civil = self.to_civil(instant);
        let t = TimeOfDay::from(civil.time());
        format!(
            "{} {}",
            format_date(civil.date(), options.date_format),
            format_clock(t.hour(), t.minute(), options.time_format)
        )
    }
}

/// Detects the host's IANA timezone.
///
/// Checks the `TZ` environment variable, then the target of the
/// `/etc/localtime` link.
pub fn detect_system_timezone() -> Option<Tz> {
    if let Ok(raw) = std::env::var(TIMEZONE_ENV_VAR) {
        if let Some(tz) = parse_timezone(raw.trim_start_matches(':')) {
            return Some(tz);
        }
    }

    let target = std::fs::read_link(Path::new(LOCALTIME_PATH)).ok()?;
    zone_from_zoneinfo_path(&target.to_string_lossy())
}

/// Parses an IANA timezone name, ignoring blanks.
pub fn parse_timezone(raw: &str) -> Option<Tz> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Extracts the zone name from a path like `/usr/share/zoneinfo/Europe/Paris`.
fn zone_from_zoneinfo_path(path: &str) -> Option<Tz> {
    let (_, name) = path.split_once(ZONEINFO_MARKER)?;
    parse_timezone(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DateFormat;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn civil(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn new_york() -> TimezoneNormalizer {
        TimezoneNormalizer::new(chrono_tz::America::New_York)
    }

    mod resolution {
        use super::*;

        #[test]
        fn organization_zone_wins() {
            let n = TimezoneNormalizer::resolve_with(Some("Europe/Istanbul"), || Some(chrono_tz::UTC));
            assert_eq!(n.timezone(), chrono_tz::Europe::Istanbul);
            assert_eq!(n.source(), TimezoneSource::Organization);
            assert_eq!(n.timezone_name(), "Europe/Istanbul");
        }

        #[test]
        fn unknown_zone_falls_back_to_system() {
            let n = TimezoneNormalizer::resolve_with(Some("Not/AZone"), || {
                Some(chrono_tz::Asia::Tokyo)
            });
            assert_eq!(n.timezone(), chrono_tz::Asia::Tokyo);
            assert_eq!(n.source(), TimezoneSource::System);
        }

        #[test]
        fn blank_zone_is_treated_as_unset() {
            let n = TimezoneNormalizer::resolve_with(Some("   "), || Some(chrono_tz::Europe::Paris));
            assert_eq!(n.source(), TimezoneSource::System);
        }

        #[test]
        fn nothing_resolves_to_utc() {
            let n = TimezoneNormalizer::resolve_with(Some("bogus"), || None);
            assert_eq!(n.timezone(), chrono_tz::UTC);
            assert_eq!(n.source(), TimezoneSource::Utc);
        }

        #[test]
        fn from_settings_uses_configured_zone() {
            let settings = OrganizationSettings::default().with_timezone("America/Chicago");
            let n = TimezoneNormalizer::from_settings(&settings);
            assert_eq!(n.timezone(), chrono_tz::America::Chicago);
        }

        #[test]
        fn zoneinfo_path_parsing() {
            assert_eq!(
                zone_from_zoneinfo_path("/usr/share/zoneinfo/Europe/Paris"),
                Some(chrono_tz::Europe::Paris)
            );
            assert_eq!(
                zone_from_zoneinfo_path("/var/db/timezone/zoneinfo/America/Denver"),
                Some(chrono_tz::America::Denver)
            );
            assert_eq!(zone_from_zoneinfo_path("/etc/localtime"), None);
        }

        #[test]
        fn parse_timezone_rejects_blank() {
            assert_eq!(parse_timezone(""), None);
            assert_eq!(parse_timezone(" UTC "), Some(chrono_tz::UTC));
        }
    }

    mod conversion {
        use super::*;

        #[test]
        fn civil_time_is_in_org_zone() {
            let n = new_york();
            // 15:00 UTC in February is 10:00 EST.
            assert_eq!(n.civil_time_at(utc(2025, 2, 5, 15, 0, 0)), civil(2025, 2, 5, 10, 0));
            assert_eq!(n.time_of_day_at(utc(2025, 2, 5, 15, 0, 0)), TimeOfDay::new(10, 0).unwrap());
        }

        #[test]
        fn civil_date_can_differ_from_utc_date() {
            let n = new_york();
            let instant = utc(2025, 2, 6, 2, 0, 0);
            assert_eq!(n.civil_date_key(instant), "2025-02-05");
        }

        #[test]
        fn roundtrip_unambiguous() {
            let n = TimezoneNormalizer::new(chrono_tz::Europe::Istanbul);
            let instant = utc(2025, 7, 1, 9, 45, 0);
            assert_eq!(n.from_civil(n.to_civil(instant)), instant);
        }

        #[test]
        fn ambiguous_maps_to_earliest() {
            // 01:30 happens twice on 2025-11-02 in New York; EDT comes first.
            let n = new_york();
            assert_eq!(n.from_civil(civil(2025, 11, 2, 1, 30)), utc(2025, 11, 2, 5, 30, 0));
        }

        #[test]
        fn gap_uses_offset_before_transition() {
            // 02:30 does not exist on 2025-03-09 in New York.
            let n = new_york();
            assert_eq!(n.from_civil(civil(2025, 3, 9, 2, 30)), utc(2025, 3, 9, 7, 30, 0));
        }

        #[test]
        fn utc_normalizer_is_identity() {
            let n = TimezoneNormalizer::utc();
            let instant = utc(2025, 2, 5, 23, 59, 0);
            assert_eq!(n.to_civil(instant), instant.naive_utc());
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn instant_in_both_formats() {
            let n = new_york();
            let instant = utc(2025, 2, 5, 19, 5, 0); // 14:05 EST
            assert_eq!(n.format_time_of_day(instant, TimeFormat::H24), "14:05");
            assert_eq!(n.format_time_of_day(instant, TimeFormat::H12), "2:05 PM");
        }

        #[test]
        fn bare_time_is_not_converted() {
            let n = new_york();
            assert_eq!(n.format_time_of_day("00:00", TimeFormat::H12), "12:00 AM");
            assert_eq!(n.format_time_of_day("12:00:00", TimeFormat::H12), "12:00 PM");
            assert_eq!(n.format_time_of_day("08:15", TimeFormat::H24), "08:15");
        }

        #[test]
        fn unparseable_bare_time_degrades() {
            let n = TimezoneNormalizer::utc();
            assert_eq!(n.format_time_of_day(" soon ", TimeFormat::H12), "soon");
        }

        #[test]
        fn civil_date_time() {
            let n = TimezoneNormalizer::new(chrono_tz::Europe::Istanbul);
            let instant = utc(2025, 2, 5, 21, 30, 0); // 00:30 next day in Istanbul
            let options = DateTimeFormatOptions::new(DateFormat::DayMonthYearSlash, TimeFormat::H12);
            assert_eq!(n.format_civil_date_time(instant, options), "06/02/2025 12:30 AM");

            let options = DateTimeFormatOptions::new(DateFormat::Iso, TimeFormat::H24);
            assert_eq!(n.format_civil_date_time(instant, options), "2025-02-06 00:30");
        }
    }
}
