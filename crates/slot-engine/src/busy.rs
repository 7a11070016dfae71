//! Turn existing bookings into busy intervals.
//!
//! Intervals are half-open `[start, end)` in minutes since midnight. An
//! appointment whose service duration cannot be resolved is left out of the
//! result (it does not block anything) and logged; it never fails the call.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::time::{parse_time, Minutes};

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether an appointment in this state occupies the provider's time.
    pub fn blocks_time(self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

/// A stored appointment as the booking layer hands it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Start time, `HH:MM`.
    pub slot_time: String,
    /// The booked service, used to look up the duration.
    pub service_id: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// An already-booked appointment with its service duration resolved
/// (or `None` when the linked service no longer exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedAppointment {
    pub slot_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_duration_minutes: Option<Minutes>,
}

/// A half-open busy range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start: Minutes,
    pub end: Minutes,
}

impl BookedInterval {
    /// Whether `[start, end)` shares at least one minute with this interval.
    ///
    /// Touching ranges (`end == self.start` or `start == self.end`) do not overlap.
    pub fn overlaps(&self, start: Minutes, end: Minutes) -> bool {
        start < self.end && end > self.start
    }
}

/// Busy interval for one booking.
///
/// Returns `Ok(None)` when the duration is unknown, which excludes the booking.
///
/// # Errors
/// Returns `SlotError::InvalidTime` if `slot_time` is not strict `HH:MM`.
pub fn busy_interval(slot_time: &str, duration: Option<Minutes>) -> Result<Option<BookedInterval>> {
    let start = parse_time(slot_time)?.minutes();
    Ok(duration.map(|d| BookedInterval {
        start,
        end: start.saturating_add(d),
    }))
}

/// Build busy intervals from stored appointments.
///
/// Cancelled appointments are skipped. `resolve_duration` maps a service id
/// to its duration; `None` excludes that appointment.
///
/// # Errors
/// Returns `SlotError::InvalidTime` for the first non-cancelled appointment
/// with a malformed `slot_time`.
pub fn build_busy_intervals<F>(
    appointments: &[Appointment],
    resolve_duration: F,
) -> Result<Vec<BookedInterval>>
where
    F: Fn(&str) -> Option<Minutes>,
{
    let mut intervals = Vec::with_capacity(appointments.len());

    for appt in appointments.iter().filter(|a| a.status.blocks_time()) {
        let duration = resolve_duration(&appt.service_id);
        match busy_interval(&appt.slot_time, duration)? {
            Some(interval) => intervals.push(interval),
            None => warn!(
                service_id = %appt.service_id,
                slot_time = %appt.slot_time,
                "service not found, appointment does not block any slot"
            ),
        }
    }

    debug!(
        appointments = appointments.len(),
        busy = intervals.len(),
        "built busy intervals"
    );
    Ok(intervals)
}

/// Build busy intervals from appointments whose durations were resolved upstream.
///
/// # Errors
/// Returns `SlotError::InvalidTime` for the first malformed `slot_time`.
pub fn busy_intervals_from_booked(booked: &[BookedAppointment]) -> Result<Vec<BookedInterval>> {
    let mut intervals = Vec::with_capacity(booked.len());

    for appt in booked {
        match busy_interval(&appt.slot_time, appt.service_duration_minutes)? {
            Some(interval) => intervals.push(interval),
            None => warn!(
                slot_time = %appt.slot_time,
                "no service duration, appointment does not block any slot"
            ),
        }
    }

    Ok(intervals)
}
