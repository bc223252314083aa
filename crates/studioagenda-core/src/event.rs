//! Event types consumed by the agenda window engine.
//!
//! This module provides:
//! - [`TimedEvent`]: a dated calendar entry that may carry a time of day
//! - [`EventKind`]: what the entry represents in the studio's schedule
//! - [`Timed`]: the seam the window engine reads time-of-day values through

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// The kind of scheduled entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A booked photography session.
    #[default]
    Session,
    /// A dated reminder attached to a lead or project.
    Reminder,
}

/// Anything that may occupy a time of day on the agenda.
///
/// The window engine only needs the raw time-of-day string; parsing and
/// validation happen inside the engine so that callers can hand over
/// whatever their storage returned.
pub trait Timed {
    /// The event's time of day as stored (`HH:MM`), if any.
    fn time_of_day(&self) -> Option<&str>;

    /// The parsed time of day, or `None` when absent or malformed.
    fn parsed_time_of_day(&self) -> Option<TimeOfDay> {
        self.time_of_day().and_then(TimeOfDay::parse)
    }
}

impl<T: Timed + ?Sized> Timed for &T {
    fn time_of_day(&self) -> Option<&str> {
        (**self).time_of_day()
    }
}

/// A point-in-time calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Opaque identifier, passed through untouched.
    pub id: String,
    /// The calendar date the event falls on.
    pub date_key: NaiveDate,
    /// Time of day as stored, `HH:MM` in 24-hour form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    /// What kind of entry this is.
    #[serde(default)]
    pub kind: EventKind,
}

impl TimedEvent {
    /// Creates a new event with no time of day.
    pub fn new(id: impl Into<String>, date_key: NaiveDate, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            date_key,
            time_of_day: None,
            kind,
        }
    }

    /// Creates a session event.
    pub fn session(id: impl Into<String>, date_key: NaiveDate) -> Self {
        Self::new(id, date_key, EventKind::Session)
    }

    /// Creates a reminder event.
    pub fn reminder(id: impl Into<String>, date_key: NaiveDate) -> Self {
        Self::new(id, date_key, EventKind::Reminder)
    }

    /// Builder method to set the time of day.
    pub fn at(mut self, time_of_day: impl Into<String>) -> Self {
        self.time_of_day = Some(time_of_day.into());
        self
    }

    /// Returns true if the event carries a valid time of day.
    pub fn is_timed(&self) -> bool {
        self.parsed_time_of_day().is_some()
    }

    /// Returns true if the event falls on the given date.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date_key == date
    }
}

impl Timed for TimedEvent {
    fn time_of_day(&self) -> Option<&str> {
        self.time_of_day.as_deref()
    }
}

impl Timed for TimeOfDay {
    fn time_of_day(&self) -> Option<&str> {
        None
    }

    fn parsed_time_of_day(&self) -> Option<TimeOfDay> {
        Some(*self)
    }
}
