//! Property-based tests for slot generation using proptest.
//!
//! These check invariants that hold for any working window, duration, step and
//! set of bookings, not just the hand-picked cases in `slots_tests.rs`.

use proptest::prelude::*;
use slot_engine::busy::BookedInterval;
use slot_engine::schedule::DaySchedule;
use slot_engine::slots::generate_slots;
use slot_engine::TimeOfDay;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A working day with `start < end`, both inside the day.
fn arb_open_day() -> impl Strategy<Value = DaySchedule> {
    (0u32..1439)
        .prop_flat_map(|start| (Just(start), (start + 1)..1440))
        .prop_map(|(start, end)| {
            DaySchedule::open(
                TimeOfDay::from_minutes(start).unwrap(),
                TimeOfDay::from_minutes(end).unwrap(),
            )
        })
}

fn arb_duration() -> impl Strategy<Value = u32> {
    1u32..=240
}

fn arb_step() -> impl Strategy<Value = u32> {
    prop_oneof![Just(5u32), Just(10), Just(15), Just(20), Just(30), Just(60), 1u32..=120]
}

fn arb_busy() -> impl Strategy<Value = Vec<BookedInterval>> {
    prop::collection::vec(
        (0u32..1440, 1u32..=180).prop_map(|(start, len)| BookedInterval {
            start,
            end: start + len,
        }),
        0..8,
    )
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn expected_count(day: &DaySchedule, duration: u32, step: u32) -> usize {
    let span = day.end_time.minutes() as i64 - day.start_time.minutes() as i64 - duration as i64;
    if span < 0 {
        0
    } else {
        (span / step as i64 + 1) as usize
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    /// With nothing booked and no clock cutoff, every step that fits is offered.
    #[test]
    fn count_matches_closed_form(day in arb_open_day(), duration in arb_duration(), step in arb_step()) {
        let slots = generate_slots(&day, duration, &[], false, 0, step).unwrap();
        prop_assert_eq!(slots.len(), expected_count(&day, duration, step));
    }

    /// Slots come out strictly ascending and on the step grid.
    #[test]
    fn slots_are_sorted_and_on_grid(
        day in arb_open_day(),
        duration in arb_duration(),
        step in arb_step(),
        busy in arb_busy(),
    ) {
        let slots = generate_slots(&day, duration, &busy, false, 0, step).unwrap();
        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for slot in &slots {
            prop_assert_eq!((slot.minutes() - day.start_time.minutes()) % step, 0);
            prop_assert!(slot.minutes() + duration <= day.end_time.minutes());
        }
    }

    /// No emitted slot overlaps a busy interval.
    #[test]
    fn slots_never_overlap_bookings(
        day in arb_open_day(),
        duration in arb_duration(),
        step in arb_step(),
        busy in arb_busy(),
    ) {
        let slots = generate_slots(&day, duration, &busy, false, 0, step).unwrap();
        for slot in &slots {
            let start = slot.minutes();
            for b in &busy {
                prop_assert!(!(start < b.end && start + duration > b.start));
            }
        }
    }

    /// Nothing at or before `now` is offered on the current day.
    #[test]
    fn today_slots_are_after_now(
        day in arb_open_day(),
        duration in arb_duration(),
        step in arb_step(),
        now in 0u32..1440,
    ) {
        let slots = generate_slots(&day, duration, &[], true, now, step).unwrap();
        for slot in &slots {
            prop_assert!(slot.minutes() > now);
        }
        let later_day = generate_slots(&day, duration, &[], false, now, step).unwrap();
        let expected: Vec<_> = later_day.into_iter().filter(|s| s.minutes() > now).collect();
        prop_assert_eq!(slots, expected);
    }

    /// Same inputs, same output.
    #[test]
    fn generation_is_deterministic(
        day in arb_open_day(),
        duration in arb_duration(),
        step in arb_step(),
        busy in arb_busy(),
        now in 0u32..1440,
        is_today in any::<bool>(),
    ) {
        let a = generate_slots(&day, duration, &busy, is_today, now, step).unwrap();
        let b = generate_slots(&day, duration, &busy, is_today, now, step).unwrap();
        prop_assert_eq!(a, b);
    }

    /// A day off is always empty.
    #[test]
    fn day_off_is_always_empty(
        day in arb_open_day(),
        duration in 0u32..=240,
        step in 0u32..=120,
        busy in arb_busy(),
        now in 0u32..1440,
        is_today in any::<bool>(),
    ) {
        let off = DaySchedule { is_day_off: true, ..day };
        let slots = generate_slots(&off, duration, &busy, is_today, now, step).unwrap();
        prop_assert!(slots.is_empty());
    }
}
