//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use studioagenda_core::TimeFormat;

/// studioagenda - Which part of the day your studio's agenda should show
#[derive(Debug, Parser)]
#[command(name = "studioagenda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "STUDIOAGENDA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Organization timezone (IANA name, e.g. "Europe/Istanbul")
    #[arg(long, global = true, env = "STUDIOAGENDA_TIMEZONE")]
    pub timezone: Option<String>,

    /// Time format: "12-hour" or "24-hour"
    #[arg(long, global = true)]
    pub time_format: Option<TimeFormat>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Inputs that determine an agenda window.
#[derive(Debug, Clone, Default, Args)]
pub struct WindowInput {
    /// Instant to treat as "now" (RFC 3339); defaults to the current time
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Civil time of day to treat as "now" (HH:MM), skipping timezone conversion
    #[arg(long, conflicts_with = "now")]
    pub at: Option<String>,

    /// Event time of day (HH:MM); can be repeated
    #[arg(long = "event", action = clap::ArgAction::Append)]
    pub events: Vec<String>,

    /// JSON file containing a list of events
    #[arg(long)]
    pub events_file: Option<PathBuf>,

    /// Only use events from this date (YYYY-MM-DD); defaults to today in the organization's timezone
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the agenda window (default)
    Window {
        #[command(flatten)]
        input: WindowInput,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the index of the slot a time of day belongs to
    Resolve {
        /// Time of day (HH:MM)
        time: String,

        #[command(flatten)]
        input: WindowInput,
    },

    /// Show the organization's current date and time
    Now {
        /// Instant to render instead of the current time (RFC 3339)
        #[arg(long)]
        instant: Option<DateTime<Utc>>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
