//! Walk a working window at a fixed step and emit bookable slot starts.
//!
//! Candidates are `[cursor, cursor + duration)`. A candidate is dropped when it
//! starts at or before "now" on the current day, or when it overlaps any busy
//! interval. Output is ascending because the cursor only moves forward.

use tracing::{debug, trace};

use crate::busy::BookedInterval;
use crate::error::{Result, SlotError};
use crate::schedule::{DaySchedule, WorkingWindow};
use crate::time::{Minutes, TimeOfDay};

/// Distance between successive candidate starts when the caller does not pick one.
pub const DEFAULT_STEP_MINUTES: Minutes = 30;

/// A candidate appointment `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCandidate {
    pub start: Minutes,
    pub end: Minutes,
}

fn validate(duration: Minutes, step: Minutes) -> Result<()> {
    if duration == 0 {
        return Err(SlotError::InvalidDuration(
            "service duration must be positive".to_string(),
        ));
    }
    if step == 0 {
        return Err(SlotError::InvalidStep("step must be positive".to_string()));
    }
    Ok(())
}

/// Generate slot starts for one day's schedule.
///
/// A day off yields an empty list whatever the other arguments are.
///
/// # Arguments
/// - `day` -- the applicable day's working hours
/// - `duration` -- length of the service being booked, in minutes
/// - `busy` -- existing bookings for that day, in any order
/// - `is_today` -- whether the date being searched is the current date
/// - `now_minutes` -- current minute of the day; only read when `is_today`
/// - `step` -- distance between candidate starts
///
/// # Errors
/// Returns `SlotError::InvalidDuration` / `SlotError::InvalidStep` for zero
/// values, and `SlotError::InvalidSchedule` for a working day that does not
/// start before it ends.
pub fn generate_slots(
    day: &DaySchedule,
    duration: Minutes,
    busy: &[BookedInterval],
    is_today: bool,
    now_minutes: Minutes,
    step: Minutes,
) -> Result<Vec<TimeOfDay>> {
    match day.window()? {
        Some(window) => generate_in_window(&window, duration, busy, is_today, now_minutes, step),
        None => Ok(Vec::new()),
    }
}

/// Generate slot starts inside an open working window.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` / `SlotError::InvalidStep` for zero values.
pub fn generate_in_window(
    window: &WorkingWindow,
    duration: Minutes,
    busy: &[BookedInterval],
    is_today: bool,
    now_minutes: Minutes,
    step: Minutes,
) -> Result<Vec<TimeOfDay>> {
    validate(duration, step)?;

    let end = window.end().minutes();
    let mut cursor = window.start().minutes();
    let mut slots = Vec::new();

    while let Some(slot_end) = cursor.checked_add(duration).filter(|e| *e <= end) {
        let candidate = SlotCandidate {
            start: cursor,
            end: slot_end,
        };

        if is_today && candidate.start <= now_minutes {
            trace!(start = candidate.start, "skipping slot in the past");
        } else if let Some(hit) = busy
            .iter()
            .find(|b| b.overlaps(candidate.start, candidate.end))
        {
            trace!(
                start = candidate.start,
                busy_start = hit.start,
                busy_end = hit.end,
                "skipping booked slot"
            );
        } else {
            slots.push(TimeOfDay::from_minutes(candidate.start)?);
        }

        cursor = match cursor.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(
        window_start = %window.start(),
        window_end = %window.end(),
        duration,
        step,
        busy = busy.len(),
        slots = slots.len(),
        "generated slots"
    );
    Ok(slots)
}
