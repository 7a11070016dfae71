//! Tests for fixed-step slot generation.

use slot_engine::busy::BookedInterval;
use slot_engine::schedule::DaySchedule;
use slot_engine::slots::generate_slots;
use slot_engine::{SlotError, TimeOfDay};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

fn day(start: &str, end: &str) -> DaySchedule {
    DaySchedule::open(t(start), t(end))
}

fn busy(start: &str, end: &str) -> BookedInterval {
    BookedInterval {
        start: t(start).minutes(),
        end: t(end).minutes(),
    }
}

fn strings(slots: &[TimeOfDay]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn morning_window_without_bookings() {
    let slots = generate_slots(&day("09:00", "12:00"), 30, &[], false, 0, 30).unwrap();
    assert_eq!(
        strings(&slots),
        ["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
    );
}

#[test]
fn booked_half_hour_is_removed() {
    let slots = generate_slots(
        &day("09:00", "12:00"),
        30,
        &[busy("10:00", "10:30")],
        false,
        0,
        30,
    )
    .unwrap();
    assert_eq!(strings(&slots), ["09:00", "09:30", "10:30", "11:00", "11:30"]);
}

#[test]
fn long_service_must_fit_before_closing() {
    // 09:30 + 45 = 10:15, past the 10:00 close.
    let slots = generate_slots(&day("09:00", "10:00"), 45, &[], false, 0, 30).unwrap();
    assert_eq!(strings(&slots), ["09:00"]);
}

#[test]
fn day_off_yields_nothing() {
    let slots = generate_slots(&DaySchedule::day_off(), 30, &[], false, 0, 30).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn day_off_yields_nothing_even_with_bad_arguments() {
    let slots = generate_slots(&DaySchedule::day_off(), 0, &[], true, 2000, 0).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn today_drops_slots_up_to_now() {
    // 10:15 → 615 minutes. 09:00..10:00 are at or before now.
    let slots = generate_slots(&day("09:00", "18:00"), 30, &[], true, 615, 30).unwrap();
    let out = strings(&slots);
    assert_eq!(out.first().map(String::as_str), Some("10:30"));
    assert_eq!(out.last().map(String::as_str), Some("17:30"));
    assert_eq!(out.len(), 15);
    for gone in ["09:00", "09:30", "10:00"] {
        assert!(!out.iter().any(|s| s == gone), "{gone} should be in the past");
    }
}

#[test]
fn slot_starting_this_minute_is_not_offered() {
    let slots = generate_slots(&day("09:00", "12:00"), 30, &[], true, 600, 30).unwrap();
    assert_eq!(strings(&slots), ["10:30", "11:00", "11:30"]);
}

#[test]
fn now_is_ignored_on_other_days() {
    let slots = generate_slots(&day("09:00", "10:00"), 30, &[], false, 1000, 30).unwrap();
    assert_eq!(strings(&slots), ["09:00", "09:30"]);
}

// ── Overlap boundaries ──────────────────────────────────────────────────────

#[test]
fn slot_ending_at_busy_start_is_free() {
    // 09:30-10:00 touches 10:00-11:00.
    let slots = generate_slots(
        &day("09:30", "10:00"),
        30,
        &[busy("10:00", "11:00")],
        false,
        0,
        30,
    )
    .unwrap();
    assert_eq!(strings(&slots), ["09:30"]);
}

#[test]
fn slot_starting_at_busy_end_is_free() {
    let slots = generate_slots(
        &day("10:00", "10:30"),
        30,
        &[busy("09:00", "10:00")],
        false,
        0,
        30,
    )
    .unwrap();
    assert_eq!(strings(&slots), ["10:00"]);
}

#[test]
fn partial_overlap_blocks_the_candidate() {
    // A 60-minute service at 09:30 runs into the 10:15 booking.
    let slots = generate_slots(
        &day("09:00", "12:00"),
        60,
        &[busy("10:15", "10:45")],
        false,
        0,
        30,
    )
    .unwrap();
    assert_eq!(strings(&slots), ["09:00", "11:00"]);
}

#[test]
fn busy_order_does_not_matter() {
    let a = [busy("11:00", "11:30"), busy("09:30", "10:00")];
    let b = [busy("09:30", "10:00"), busy("11:00", "11:30")];
    let window = day("09:00", "12:00");
    assert_eq!(
        generate_slots(&window, 30, &a, false, 0, 30).unwrap(),
        generate_slots(&window, 30, &b, false, 0, 30).unwrap()
    );
}

#[test]
fn custom_step() {
    let slots = generate_slots(&day("09:00", "10:00"), 15, &[], false, 0, 15).unwrap();
    assert_eq!(strings(&slots), ["09:00", "09:15", "09:30", "09:45"]);
}

#[test]
fn service_longer_than_window_yields_nothing() {
    let slots = generate_slots(&day("09:00", "09:30"), 45, &[], false, 0, 30).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn late_window_near_midnight() {
    let slots = generate_slots(&day("22:00", "23:59"), 30, &[], false, 0, 30).unwrap();
    assert_eq!(strings(&slots), ["22:00", "22:30", "23:00"]);
}

// ── Preconditions ───────────────────────────────────────────────────────────

#[test]
fn zero_duration_is_rejected() {
    let err = generate_slots(&day("09:00", "12:00"), 0, &[], false, 0, 30).unwrap_err();
    assert!(matches!(err, SlotError::InvalidDuration(_)));
    assert!(err.is_invalid_input());
}

#[test]
fn zero_step_is_rejected() {
    let err = generate_slots(&day("09:00", "12:00"), 30, &[], false, 0, 0).unwrap_err();
    assert!(matches!(err, SlotError::InvalidStep(_)));
}

#[test]
fn inverted_working_day_is_rejected() {
    let err = generate_slots(&day("18:00", "09:00"), 30, &[], false, 0, 30).unwrap_err();
    assert!(matches!(err, SlotError::InvalidSchedule(_)));
}
