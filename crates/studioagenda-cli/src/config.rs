//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/studioagenda/config.toml` by default:
//!
//! ```toml
//! [organization]
//! timezone = "Europe/Istanbul"
//! time_format = "12-hour"
//! date_format = "DD/MM/YYYY"
//!
//! [display]
//! now_marker = "<- now"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use studioagenda_core::{OrganizationSettings, TimeFormat, TracingConfig};

use crate::error::{CliError, CliResult};

/// Configuration for the studioagenda CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Debug mode.
    pub debug: bool,

    /// Organization display settings.
    pub organization: OrganizationSettings,

    /// Terminal rendering settings.
    pub display: DisplaySettings,
}

/// Terminal rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Marker printed next to the slot containing the current time.
    pub now_marker: String,

    /// Whether to print the stats footer under the slot list.
    pub show_stats: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            now_marker: "<- now".to_string(),
            show_stats: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studioagenda")
    }

    /// Logging settings; `debug = true` in the file acts like `--debug`.
    pub fn tracing_config(&self, debug_flag: bool) -> TracingConfig {
        TracingConfig::for_cli(debug_flag || self.debug)
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn with_overrides(mut self, timezone: Option<&str>, time_format: Option<TimeFormat>) -> Self {
        if let Some(tz) = timezone {
            self.organization.timezone = Some(tz.to_string());
        }
        if let Some(format) = time_format {
            self.organization.time_format = format;
        }
        self
    }
}
