//! Slot snapping and span enforcement.
//!
//! Every boundary the engine produces goes through these helpers, so the
//! idle and event-driven paths clamp identically.

use super::{MAX_MINUTE_OF_DAY, MIN_SPAN_MINUTES, SLOT_MINUTES};

const SLOT: i64 = SLOT_MINUTES as i64;
const MAX: i64 = MAX_MINUTE_OF_DAY as i64;
const MIN_SPAN: i64 = MIN_SPAN_MINUTES as i64;

/// Clamps to `[0, MAX_MINUTE_OF_DAY]` and rounds down to a slot boundary.
pub(crate) fn round_down_to_slot(minute: i64) -> u32 {
    let m = minute.clamp(0, MAX);
    to_minute(m - m % SLOT)
}

/// Clamps to `[0, MAX_MINUTE_OF_DAY]` and rounds up to a slot boundary.
pub(crate) fn round_up_to_slot(minute: i64) -> u32 {
    let m = minute.clamp(0, MAX);
    to_minute(((m + SLOT - 1) / SLOT * SLOT).min(MAX))
}

/// Widens a slot-aligned range until it spans at least `MIN_SPAN_MINUTES`.
///
/// The missing slots are split between both sides, with the odd one going
/// after. Whatever cannot fit past midnight or past the last slot is pushed
/// onto the other side.
pub(crate) fn ensure_minimum_span(start: u32, end: u32) -> (u32, u32) {
    let (mut start, mut end) = (i64::from(start), i64::from(end.max(start)));
    let span = end - start;
    if span >= MIN_SPAN {
        return (to_minute(start), to_minute(end));
    }

    let missing_slots = (MIN_SPAN - span + SLOT - 1) / SLOT;
    let before = missing_slots / 2;
    let after = missing_slots - before;
    start -= before * SLOT;
    end += after * SLOT;

    if start < 0 {
        end += -start;
        start = 0;
    }
    if end > MAX {
        start = (start - (end - MAX)).max(0);
        end = MAX;
    }

    (to_minute(start), to_minute(end))
}

fn to_minute(m: i64) -> u32 {
    u32::try_from(m.clamp(0, MAX)).unwrap_or(0)
}
