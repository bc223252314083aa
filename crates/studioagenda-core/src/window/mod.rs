//! Adaptive agenda window.
//!
//! Decides which half-hour slots of a day a schedule view should show. The
//! window always keeps the organization's current time visible, grows to
//! cover early or late events with some padding, and never shrinks below
//! eight hours.
//!
//! The computation is a pure function of the event list, the current time
//! of day and the display preference. It keeps no state and reads no clock;
//! [`compute_window_now`] is the only entry point that looks at the wall
//! clock, through the [`TimezoneNormalizer`].
//!
//! # Example
//!
//! ```rust
//! use studioagenda_core::{compute_window, TimeFormat, TimeOfDay, TimedEvent};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
//! let events = vec![TimedEvent::session("s-1", today).at("08:30")];
//! let now = TimeOfDay::new(14, 0).unwrap();
//!
//! let window = compute_window(&events, now, TimeFormat::H24);
//! assert_eq!(window.stats().start_label, "07:30");
//! assert_eq!(window.stats().end_label, "18:00");
//! ```

mod snap;

#[cfg(test)]
mod golden_tests;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::Timed;
use crate::format::{TimeFormat, format_clock};
use crate::time::{MINUTES_PER_HOUR, TimeOfDay};
use crate::timezone::TimezoneNormalizer;

use self::snap::{ensure_minimum_span, round_down_to_slot, round_up_to_slot};

/// Slot granularity in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Minimum displayed span in minutes.
pub const MIN_SPAN_MINUTES: u32 = 480;

/// Window start used when there are no timed events (07:00).
pub const DEFAULT_BUSINESS_START: u32 = 420;

/// Window end used when there are no timed events (20:00).
pub const DEFAULT_BUSINESS_END: u32 = 1200;

/// Slack shown before the earliest timed event.
pub const PAD_BEFORE_MINUTES: u32 = 60;

/// Slack shown after the latest timed event.
pub const PAD_AFTER_MINUTES: u32 = 90;

/// Start of the last representable slot (23:30).
pub const MAX_MINUTE_OF_DAY: u32 = 1410;

/// Number of slots per hour.
pub const SLOTS_PER_HOUR: u32 = MINUTES_PER_HOUR / SLOT_MINUTES;

/// Minutes a slot can round down by when resolving a time string to a slot.
const RESOLVE_ROUNDING_THRESHOLD: u32 = 15;

/// One half-hour row of the agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// Minutes past midnight; a multiple of [`SLOT_MINUTES`].
    pub minute_of_day: u32,
    /// Hour component.
    pub hour: u32,
    /// Minute component (0 or 30).
    pub minute: u32,
    /// Label rendered per the organization's time format.
    pub display_label: String,
}

impl TimeSlot {
    fn new(minute_of_day: u32, format: TimeFormat) -> Self {
        let hour = minute_of_day / MINUTES_PER_HOUR;
        let minute = minute_of_day % MINUTES_PER_HOUR;
        Self {
            minute_of_day,
            hour,
            minute,
            display_label: format_clock(hour, minute, format),
        }
    }

    /// The slot's start as a time of day.
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_minute_of_day(self.minute_of_day)
    }

    /// Returns true if `minute_of_day` falls within this slot.
    pub fn covers(&self, minute_of_day: u32) -> bool {
        (self.minute_of_day..self.minute_of_day + SLOT_MINUTES).contains(&minute_of_day)
    }
}

/// Summary of a computed window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStats {
    /// First slot, minutes past midnight.
    pub start_minute: u32,
    /// Last slot, minutes past midnight.
    pub end_minute: u32,
    /// Label of the first slot.
    pub start_label: String,
    /// Label of the last slot.
    pub end_label: String,
    /// Number of slots.
    pub total_slots: usize,
    /// Hours between the first and the last slot.
    pub total_hours: f64,
    /// Always [`SLOTS_PER_HOUR`].
    pub slots_per_hour: u32,
}

/// The slots an agenda view should render.
///
/// Slots are contiguous, strictly increasing by [`SLOT_MINUTES`], never
/// empty, and span at least [`MIN_SPAN_MINUTES`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayWindow {
    slots: Vec<TimeSlot>,
    stats: WindowStats,
}

impl DisplayWindow {
    fn from_range(start: u32, end: u32, format: TimeFormat) -> Self {
        let slots: Vec<TimeSlot> = (start..=end)
            .step_by(SLOT_MINUTES as usize)
            .map(|m| TimeSlot::new(m, format))
            .collect();

        let stats = WindowStats {
            start_minute: start,
            end_minute: end,
            start_label: format_clock(start / MINUTES_PER_HOUR, start % MINUTES_PER_HOUR, format),
            end_label: format_clock(end / MINUTES_PER_HOUR, end % MINUTES_PER_HOUR, format),
            total_slots: slots.len(),
            total_hours: slots.len().saturating_sub(1) as f64 / f64::from(SLOTS_PER_HOUR),
            slots_per_hour: SLOTS_PER_HOUR,
        };

        Self { slots, stats }
    }

    /// The slots, earliest first.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Summary statistics.
    pub fn stats(&self) -> &WindowStats {
        &self.stats
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots. Computed windows are never empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot labels, earliest first.
    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.display_label.as_str()).collect()
    }

    /// Returns true if some slot covers `minute_of_day`.
    pub fn contains_minute(&self, minute_of_day: u32) -> bool {
        self.slot_index_for_minute(minute_of_day).is_some()
    }

    /// Index of the slot covering `minute_of_day`, if any.
    pub fn slot_index_for_minute(&self, minute_of_day: u32) -> Option<usize> {
        let start = self.stats.start_minute;
        let past_end = self.stats.end_minute.saturating_add(SLOT_MINUTES);
        if minute_of_day < start || minute_of_day >= past_end {
            return None;
        }
        Some(((minute_of_day - start) / SLOT_MINUTES) as usize)
    }

    /// Index of the slot a "now" marker belongs in.
    pub fn current_slot_index(&self, current: TimeOfDay) -> Option<usize> {
        self.slot_index_for_minute(current.minute_of_day())
    }

    /// Maps an `HH:MM` string to the index of its half-hour slot.
    ///
    /// Minutes below 15 land on the hour's `:00` slot, everything else on its
    /// `:30` slot. Returns 0 when the string does not parse or the slot is
    /// not part of this window.
    pub fn resolve_slot_index(&self, time: &str) -> usize {
        let Some(t) = TimeOfDay::parse(time) else {
            return 0;
        };
        let minute = if t.minute() < RESOLVE_ROUNDING_THRESHOLD {
            0
        } else {
            SLOT_MINUTES
        };
        self.slots
            .iter()
            .position(|s| s.hour == t.hour() && s.minute == minute)
            .unwrap_or(0)
    }
}

/// Earliest and latest timed event, in minutes past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EventBounds {
    earliest: u32,
    latest: u32,
}

fn scan_events<I>(events: I) -> Option<EventBounds>
where
    I: IntoIterator,
    I::Item: Timed,
{
    events
        .into_iter()
        .filter_map(|e| e.parsed_time_of_day())
        .map(|t| t.minute_of_day())
        .fold(None, |bounds, m| {
            Some(match bounds {
                None => EventBounds {
                    earliest: m,
                    latest: m,
                },
                Some(b) => EventBounds {
                    earliest: b.earliest.min(m),
                    latest: b.latest.max(m),
                },
            })
        })
}

/// The minimum-span range centered on `current`, before snapping.
fn target_range(current: u32, has_timed_events: bool) -> (i64, i64) {
    let current = i64::from(current);
    let half = i64::from(MIN_SPAN_MINUTES / 2);
    let span = i64::from(MIN_SPAN_MINUTES);
    let max = i64::from(MAX_MINUTE_OF_DAY);

    let (mut start, mut end) = (current - half, current + half);
    if start < 0 {
        start = 0;
        end = span;
    }
    if end > max {
        end = max;
        start = (max - span).max(0);
    }

    let business_start = i64::from(DEFAULT_BUSINESS_START);
    let business_end = i64::from(DEFAULT_BUSINESS_END);
    if !has_timed_events && (business_start..=business_end).contains(&current) {
        if start < business_start {
            let shift = business_start - start;
            start += shift;
            end += shift;
        }
        if end > business_end {
            let shift = end - business_end;
            start -= shift;
            end -= shift;
        }
    }

    (start, end)
}

/// Computes the slot range `(start, end)`, both inclusive slot starts.
fn window_range(bounds: Option<EventBounds>, current: u32) -> (u32, u32) {
    let (target_start, target_end) = target_range(current, bounds.is_some());
    let (start, end) =
        ensure_minimum_span(round_down_to_slot(target_start), round_up_to_slot(target_end));

    let Some(bounds) = bounds else {
        return (start, end);
    };

    let event_start =
        round_down_to_slot(i64::from(bounds.earliest) - i64::from(PAD_BEFORE_MINUTES));
    let event_end = round_up_to_slot(i64::from(bounds.latest) + i64::from(PAD_AFTER_MINUTES));
    ensure_minimum_span(start.min(event_start), end.max(event_end))
}

/// Computes the agenda window for `events` at the given current time.
///
/// Events without a parseable time of day are ignored. Never panics.
pub fn compute_window<I>(events: I, current: TimeOfDay, format: TimeFormat) -> DisplayWindow
where
    I: IntoIterator,
    I::Item: Timed,
{
    let bounds = scan_events(events);
    let (start, end) = window_range(bounds, current.minute_of_day());
    tracing::trace!(
        start,
        end,
        current = %current,
        has_timed_events = bounds.is_some(),
        "computed agenda window"
    );
    DisplayWindow::from_range(start, end, format)
}

/// Computes the window for the organization's civil time at `instant`.
pub fn compute_window_at<I>(
    events: I,
    normalizer: &TimezoneNormalizer,
    instant: DateTime<Utc>,
    format: TimeFormat,
) -> DisplayWindow
where
    I: IntoIterator,
    I::Item: Timed,
{
    compute_window(events, normalizer.time_of_day_at(instant), format)
}

/// Computes the window for the organization's current civil time.
pub fn compute_window_now<I>(events: I, normalizer: &TimezoneNormalizer, format: TimeFormat) -> DisplayWindow
where
    I: IntoIterator,
    I::Item: Timed,
{
    compute_window_at(events, normalizer, Utc::now(), format)
}
