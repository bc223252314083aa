//! Organization display settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{DateFormat, DateTimeFormatOptions, TimeFormat};
use crate::timezone::parse_timezone;

/// Errors raised while interpreting user-supplied setting values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Unknown time format value.
    #[error("invalid time format {value:?} (expected \"12-hour\" or \"24-hour\")")]
    InvalidTimeFormat { value: String },

    /// Unknown date pattern.
    #[error("invalid date format {value:?} (expected one of MM/DD/YYYY, DD/MM/YYYY, YYYY-MM-DD, MM-DD-YYYY, DD-MM-YYYY)")]
    InvalidDateFormat { value: String },

    /// Timezone name that is not a known IANA identifier.
    #[error("unknown timezone {value:?}")]
    UnknownTimezone { value: String },
}

impl SettingsError {
    /// Creates an invalid time format error.
    pub fn invalid_time_format(value: impl Into<String>) -> Self {
        Self::InvalidTimeFormat {
            value: value.into(),
        }
    }

    /// Creates an invalid date format error.
    pub fn invalid_date_format(value: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            value: value.into(),
        }
    }

    /// Creates an unknown timezone error.
    pub fn unknown_timezone(value: impl Into<String>) -> Self {
        Self::UnknownTimezone {
            value: value.into(),
        }
    }
}

/// Per-organization preferences that drive time display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationSettings {
    /// IANA timezone name (e.g. "Europe/Istanbul"). `None` means the system zone.
    pub timezone: Option<String>,
    /// 12/24-hour clock preference.
    pub time_format: TimeFormat,
    /// Date pattern preference.
    pub date_format: DateFormat,
}

impl OrganizationSettings {
    /// Builder method to set the timezone.
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    /// Builder method to set the time format.
    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Builder method to set the date format.
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    /// Returns the combined date/time rendering options.
    pub fn date_time_options(&self) -> DateTimeFormatOptions {
        DateTimeFormatOptions::new(self.date_format, self.time_format)
    }

    /// Checks that every configured value is usable.
    ///
    /// Formats are already typed; only the timezone name can be wrong. A
    /// blank name counts as unset, the same as for the normalizer.
    pub fn validate(&self) -> Result<(), SettingsError> {
        match self.timezone.as_deref() {
            Some(tz) if !tz.trim().is_empty() && parse_timezone(tz).is_none() => {
                Err(SettingsError::unknown_timezone(tz))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = OrganizationSettings::default();
        assert_eq!(settings.timezone, None);
        assert_eq!(settings.time_format, TimeFormat::H24);
        assert_eq!(settings.date_format, DateFormat::MonthDayYearSlash);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let settings = OrganizationSettings::default()
            .with_timezone("America/Chicago")
            .with_time_format(TimeFormat::H12)
            .with_date_format(DateFormat::Iso);

        assert_eq!(settings.timezone.as_deref(), Some("America/Chicago"));
        assert_eq!(
            settings.date_time_options(),
            DateTimeFormatOptions::new(DateFormat::Iso, TimeFormat::H12)
        );
    }

    #[test]
    fn validate_rejects_unknown_timezone() {
        let settings = OrganizationSettings::default().with_timezone("Mars/Olympus_Mons");
        assert_eq!(
            settings.validate(),
            Err(SettingsError::unknown_timezone("Mars/Olympus_Mons"))
        );
    }

    #[test]
    fn validate_accepts_what_the_normalizer_accepts() {
        for tz in ["", "   ", " Europe/Istanbul "] {
            let settings = OrganizationSettings::default().with_timezone(tz);
            assert!(settings.validate().is_ok(), "{tz:?}");
        }
    }

    #[test]
    fn deserialize_partial() {
        let settings: OrganizationSettings =
            serde_json::from_str(r#"{"time_format":"12-hour"}"#).unwrap();
        assert_eq!(settings.time_format, TimeFormat::H12);
        assert_eq!(settings.date_format, DateFormat::default());
        assert_eq!(settings.timezone, None);
    }

    #[test]
    fn error_messages() {
        let err = SettingsError::invalid_time_format("13-hour");
        assert!(err.to_string().contains("\"13-hour\""));
    }
}
