//! Core types: time of day, events, timezone normalization, agenda windows

pub mod event;
pub mod format;
pub mod settings;
pub mod time;
pub mod timezone;
pub mod tracing;
pub mod window;

pub use event::{EventKind, Timed, TimedEvent};
pub use format::{DateFormat, DateTimeFormatOptions, TimeFormat, format_clock, format_date};
pub use settings::{OrganizationSettings, SettingsError};
pub use time::TimeOfDay;
pub use timezone::{TimeInput, TimezoneNormalizer, TimezoneSource, detect_system_timezone};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use window::{
    DisplayWindow, TimeSlot, WindowStats, compute_window, compute_window_at, compute_window_now,
};
