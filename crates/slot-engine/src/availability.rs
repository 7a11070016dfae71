//! Bookable slots for a provider on a given date.
//!
//! Composes the schedule resolver, the busy-interval builder and the slot
//! generator. The caller supplies every input, including the current time;
//! nothing here reads the system clock or talks to storage.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::busy::{busy_intervals_from_booked, BookedAppointment};
use crate::error::{Result, SlotError};
use crate::schedule::{resolve_day, DayResolution, WeeklySchedule};
use crate::slots::{generate_in_window, DEFAULT_STEP_MINUTES};
use crate::time::{parse_date, parse_time, Minutes};

/// Compute the bookable `HH:MM` slot starts for `date`, stepping 30 minutes.
///
/// # Arguments
/// - `schedule` -- the provider's weekly working hours
/// - `date` -- calendar date, `YYYY-MM-DD`
/// - `service_duration` -- length of the service being booked
/// - `booked` -- the provider's non-cancelled appointments on `date`
/// - `now` -- the current local date and time
///
/// # Errors
/// Returns `SlotError::InvalidDate` for a malformed date, `SlotError::InvalidTime`
/// for a malformed appointment time, `SlotError::InvalidDuration` for a zero
/// duration, and `SlotError::InvalidSchedule` for an inverted working day.
pub fn compute_available_slots(
    schedule: &WeeklySchedule,
    date: &str,
    service_duration: Minutes,
    booked: &[BookedAppointment],
    now: NaiveDateTime,
) -> Result<Vec<String>> {
    compute_available_slots_with_step(
        schedule,
        date,
        service_duration,
        booked,
        now,
        DEFAULT_STEP_MINUTES,
    )
}

/// Identical to [`compute_available_slots`] with an explicit step between
/// candidate starts.
///
/// # Errors
/// As [`compute_available_slots`], plus `SlotError::InvalidStep` for a zero step.
pub fn compute_available_slots_with_step(
    schedule: &WeeklySchedule,
    date: &str,
    service_duration: Minutes,
    booked: &[BookedAppointment],
    now: NaiveDateTime,
    step: Minutes,
) -> Result<Vec<String>> {
    let date = parse_date(date)?;

    let window = match resolve_day(schedule, date)? {
        DayResolution::Open(window) => window,
        DayResolution::Closed => return Ok(Vec::new()),
    };

    let busy = busy_intervals_from_booked(booked)?;
    let is_today = date == now.date();
    let now_minutes = now.hour() * 60 + now.minute();

    let slots = generate_in_window(&window, service_duration, &busy, is_today, now_minutes, step)?;
    Ok(slots.iter().map(ToString::to_string).collect())
}

/// Whether `slot_time` is one of the slots [`compute_available_slots_with_step`]
/// would offer.
///
/// # Errors
/// As [`compute_available_slots_with_step`], plus `SlotError::InvalidTime` for
/// a malformed `slot_time`.
pub fn is_slot_available(
    schedule: &WeeklySchedule,
    date: &str,
    service_duration: Minutes,
    booked: &[BookedAppointment],
    now: NaiveDateTime,
    step: Minutes,
    slot_time: &str,
) -> Result<bool> {
    let wanted = parse_time(slot_time)?.to_string();
    let slots =
        compute_available_slots_with_step(schedule, date, service_duration, booked, now, step)?;
    Ok(slots.contains(&wanted))
}

/// The JSON body accepted by the CLI and the WASM bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    #[serde(default)]
    pub provider_schedule: WeeklySchedule,
    /// `YYYY-MM-DD`
    pub date: String,
    pub service_duration: Minutes,
    #[serde(default)]
    pub busy_appointments: Vec<BookedAppointment>,
    /// Local wall-clock time, e.g. `2024-03-20T10:15:00`. When absent the
    /// caller's clock is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Minutes>,
}

impl AvailabilityRequest {
    /// The request's own `now`, falling back to `clock`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRequest` when neither is available.
    pub fn now_or(&self, clock: Option<NaiveDateTime>) -> Result<NaiveDateTime> {
        self.now.or(clock).ok_or_else(|| {
            SlotError::InvalidRequest("request has no 'now' and no clock was supplied".to_string())
        })
    }

    /// Evaluate the request. `default_step` applies when the request has no `step`.
    ///
    /// # Errors
    /// As [`compute_available_slots_with_step`] and [`AvailabilityRequest::now_or`].
    pub fn evaluate(&self, clock: Option<NaiveDateTime>, default_step: Minutes) -> Result<Vec<String>> {
        compute_available_slots_with_step(
            &self.provider_schedule,
            &self.date,
            self.service_duration,
            &self.busy_appointments,
            self.now_or(clock)?,
            self.step.unwrap_or(default_step),
        )
    }

    /// Whether `slot_time` would be offered for this request.
    ///
    /// # Errors
    /// As [`is_slot_available`] and [`AvailabilityRequest::now_or`].
    pub fn admits(
        &self,
        slot_time: &str,
        clock: Option<NaiveDateTime>,
        default_step: Minutes,
    ) -> Result<bool> {
        is_slot_available(
            &self.provider_schedule,
            &self.date,
            self.service_duration,
            &self.busy_appointments,
            self.now_or(clock)?,
            self.step.unwrap_or(default_step),
            slot_time,
        )
    }
}
