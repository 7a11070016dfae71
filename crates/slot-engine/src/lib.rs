//! # slot-engine
//!
//! Deterministic availability-slot computation for appointment booking.
//!
//! Given a provider's weekly working hours, a calendar date, a service duration
//! and the provider's existing bookings for that date, the engine returns the
//! ascending list of `HH:MM` start times that can still be booked. It is a pure
//! function of its inputs: the current time is passed in, and it performs no I/O.
//!
//! ## Modules
//!
//! - [`schedule`] — weekly working hours and date → working window resolution
//! - [`busy`] — appointments → half-open busy intervals
//! - [`slots`] — fixed-step slot generation with past-time and overlap filtering
//! - [`availability`] — the composed entry point and its JSON request shape
//! - [`time`] — `HH:MM` and `YYYY-MM-DD` parsing and formatting
//! - [`error`] — Error types

pub mod availability;
pub mod busy;
pub mod error;
pub mod schedule;
pub mod slots;
pub mod time;

pub use availability::{
    compute_available_slots, compute_available_slots_with_step, is_slot_available,
    AvailabilityRequest,
};
pub use busy::{build_busy_intervals, Appointment, AppointmentStatus, BookedAppointment, BookedInterval};
pub use error::SlotError;
pub use schedule::{resolve, resolve_day, DayResolution, DaySchedule, WeeklySchedule, WeeklySchedulePatch};
pub use slots::{generate_slots, DEFAULT_STEP_MINUTES};
pub use time::{Minutes, TimeOfDay};
