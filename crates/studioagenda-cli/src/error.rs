//! CLI error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use studioagenda_core::{SettingsError, TracingError};

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A configured or supplied setting value is invalid.
    #[error("invalid setting: {0}")]
    Settings(#[from] SettingsError),

    /// Events file could not be parsed.
    #[error("invalid events file {}: {source}", path.display())]
    EventsFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A time-of-day argument could not be parsed.
    #[error("invalid time of day {value:?} (expected HH:MM)")]
    InvalidTime { value: String },

    /// Output could not be serialized.
    #[error("failed to serialize output: {message}")]
    Serialize { message: String },

    /// Tracing could not be initialized.
    #[error(transparent)]
    Tracing(#[from] TracingError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid time error.
    pub fn invalid_time(value: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialize(message: impl ToString) -> Self {
        Self::Serialize {
            message: message.to_string(),
        }
    }
}
