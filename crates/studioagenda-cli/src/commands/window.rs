//! Agenda window and slot lookup commands.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use studioagenda_core::{
    DisplayWindow, TimeOfDay, TimedEvent, TimezoneNormalizer, compute_window,
};

use crate::cli::WindowInput;
use crate::config::{AppConfig, DisplaySettings};
use crate::error::{CliError, CliResult};

/// Everything the engine needs, resolved from arguments and files.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInput {
    /// Civil time of day treated as "now".
    pub current: TimeOfDay,
    /// Civil date whose events are considered.
    pub date: NaiveDate,
    /// Events on that date.
    pub events: Vec<TimedEvent>,
}

/// JSON output for the `window` command.
#[derive(Debug, Serialize)]
pub struct WindowReport<'a> {
    /// Effective IANA timezone.
    pub timezone: &'static str,
    /// Civil date of the agenda.
    pub date: NaiveDate,
    /// Civil time treated as "now".
    pub current: TimeOfDay,
    /// Slot the current time falls in.
    pub current_slot_index: Option<usize>,
    /// The computed window.
    pub window: &'a DisplayWindow,
}

/// Print the agenda window.
pub fn run(input: &WindowInput, json: bool, config: &AppConfig) -> CliResult<()> {
    let normalizer = TimezoneNormalizer::from_settings(&config.organization);
    let instant = input.now.unwrap_or_else(Utc::now);
    let resolved = resolve_input(input, &normalizer, instant)?;
    let window = compute_window(
        &resolved.events,
        resolved.current,
        config.organization.time_format,
    );

    if json {
        let report = WindowReport {
            timezone: normalizer.timezone_name(),
            date: resolved.date,
            current: resolved.current,
            current_slot_index: window.current_slot_index(resolved.current),
            window: &window,
        };
        let out = serde_json::to_string_pretty(&report).map_err(CliError::serialize)?;
        println!("{}", out);
    } else {
        print!("{}", render_tty(&window, resolved.current, &config.display));
    }

    Ok(())
}

/// Print the slot index for a time of day.
pub fn resolve(time: &str, input: &WindowInput, config: &AppConfig) -> CliResult<()> {
    let normalizer = TimezoneNormalizer::from_settings(&config.organization);
    let instant = input.now.unwrap_or_else(Utc::now);
    let resolved = resolve_input(input, &normalizer, instant)?;
    let window = compute_window(
        &resolved.events,
        resolved.current,
        config.organization.time_format,
    );
    println!("{}", window.resolve_slot_index(time));
    Ok(())
}

/// Resolves "now", the agenda date and the event list.
pub fn resolve_input(
    input: &WindowInput,
    normalizer: &TimezoneNormalizer,
    instant: DateTime<Utc>,
) -> CliResult<ResolvedInput> {
    let current = match input.at.as_deref() {
        Some(raw) => TimeOfDay::parse(raw).ok_or_else(|| CliError::invalid_time(raw))?,
        None => normalizer.time_of_day_at(instant),
    };
    let date = input.date.unwrap_or_else(|| normalizer.civil_date(instant));

    let mut events: Vec<TimedEvent> = input
        .events
        .iter()
        .enumerate()
        .map(|(i, raw)| TimedEvent::session(format!("arg-{}", i + 1), date).at(raw.as_str()))
        .collect();

    if let Some(ref path) = input.events_file {
        events.extend(load_events(path)?.into_iter().filter(|e| e.is_on(date)));
    }

    for event in events.iter().filter(|e| !e.is_timed()) {
        if let Some(ref raw) = event.time_of_day {
            tracing::warn!(id = %event.id, time = %raw, "ignoring unparseable event time");
        }
    }

    tracing::debug!(
        current = %current,
        date = %date,
        events = events.len(),
        "resolved window input"
    );

    Ok(ResolvedInput {
        current,
        date,
        events,
    })
}

/// Reads a JSON array of events.
pub fn load_events(path: &Path) -> CliResult<Vec<TimedEvent>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CliError::EventsFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders one slot per line, marking the current slot, with a stats footer.
pub fn render_tty(window: &DisplayWindow, current: TimeOfDay, display: &DisplaySettings) -> String {
    let current_idx = window.current_slot_index(current);
    let width = window
        .slots()
        .iter()
        .map(|s| s.display_label.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, slot) in window.slots().iter().enumerate() {
        if current_idx == Some(i) {
            out.push_str(&format!(
                "{:>width$}  {}\n",
                slot.display_label, display.now_marker
            ));
        } else {
            out.push_str(&format!("{:>width$}\n", slot.display_label));
        }
    }

    if display.show_stats {
        let stats = window.stats();
        out.push_str(&format!(
            "{} - {} ({} hours, {} slots)\n",
            stats.start_label, stats.end_label, stats.total_hours, stats.total_slots
        ));
    }

    out
}
