//! Golden tests for rendered agenda windows.
//!
//! These tests use insta inline snapshots to pin the exact slot labels an
//! agenda view receives. Run with `cargo insta review` after intentional
//! changes.

use chrono::NaiveDate;

use crate::event::TimedEvent;
use crate::format::TimeFormat;
use crate::time::TimeOfDay;
use crate::window::compute_window;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 5).unwrap()
}

fn time(h: u32, m: u32) -> TimeOfDay {
    TimeOfDay::new(h, m).unwrap()
}

fn session_at(t: &str) -> TimedEvent {
    TimedEvent::session(format!("session-{t}"), reference_date()).at(t)
}

// =============================================================================
// Label sequences
// =============================================================================

#[test]
fn idle_afternoon_twelve_hour_labels() {
    let window = compute_window(Vec::<TimedEvent>::new(), time(14, 0), TimeFormat::H12);
    insta::assert_snapshot!(window.labels().join("\n"), @r"
    10:00 AM
    10:30 AM
    11:00 AM
    11:30 AM
    12:00 PM
    12:30 PM
    1:00 PM
    1:30 PM
    2:00 PM
    2:30 PM
    3:00 PM
    3:30 PM
    4:00 PM
    4:30 PM
    5:00 PM
    5:30 PM
    6:00 PM
    ");
}

#[test]
fn just_after_midnight_twelve_hour_labels() {
    let window = compute_window(Vec::<TimedEvent>::new(), time(0, 20), TimeFormat::H12);
    insta::assert_snapshot!(window.labels().join("\n"), @r"
    12:00 AM
    12:30 AM
    1:00 AM
    1:30 AM
    2:00 AM
    2:30 AM
    3:00 AM
    3:30 AM
    4:00 AM
    4:30 AM
    5:00 AM
    5:30 AM
    6:00 AM
    6:30 AM
    7:00 AM
    7:30 AM
    8:00 AM
    ");
}

#[test]
fn late_night_twenty_four_hour_labels() {
    let window = compute_window(Vec::<TimedEvent>::new(), time(23, 59), TimeFormat::H24);
    insta::assert_snapshot!(window.labels().join("\n"), @r"
    15:30
    16:00
    16:30
    17:00
    17:30
    18:00
    18:30
    19:00
    19:30
    20:00
    20:30
    21:00
    21:30
    22:00
    22:30
    23:00
    23:30
    ");
}

// =============================================================================
// Stats
// =============================================================================

#[test]
fn idle_afternoon_stats() {
    let window = compute_window(Vec::<TimedEvent>::new(), time(14, 0), TimeFormat::H24);
    insta::assert_debug_snapshot!(window.stats(), @r#"
    WindowStats {
        start_minute: 600,
        end_minute: 1080,
        start_label: "10:00",
        end_label: "18:00",
        total_slots: 17,
        total_hours: 8.0,
        slots_per_hour: 2,
    }
    "#);
}

#[test]
fn evening_session_stats() {
    let events = vec![session_at("21:15")];
    let window = compute_window(&events, time(14, 0), TimeFormat::H12);
    insta::assert_debug_snapshot!(window.stats(), @r#"
    WindowStats {
        start_minute: 600,
        end_minute: 1380,
        start_label: "10:00 AM",
        end_label: "11:00 PM",
        total_slots: 27,
        total_hours: 13.0,
        slots_per_hour: 2,
    }
    "#);
}

// =============================================================================
// JSON shape
// =============================================================================

#[test]
fn slot_json_shape() {
    let window = compute_window(Vec::<TimedEvent>::new(), time(14, 0), TimeFormat::H12);
    let idx = window.resolve_slot_index("14:05");
    insta::assert_json_snapshot!(window.slots()[idx], @r#"
    {
      "minute_of_day": 840,
      "hour": 14,
      "minute": 0,
      "display_label": "2:00 PM"
    }
    "#);
}
