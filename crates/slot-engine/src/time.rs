//! Time-of-day and calendar-date parsing.
//!
//! Times are carried as minutes since midnight (0..=1439) so that interval
//! arithmetic stays integer-only. The wire format is strictly `HH:MM`,
//! zero-padded, 24-hour; anything else is rejected rather than coerced.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Minutes, used both for durations and for minutes-since-midnight.
pub type Minutes = u32;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// A wall-clock time of day at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(Minutes);

impl TimeOfDay {
    /// Literal times known to be in range.
    pub(crate) const fn hm(hour: u32, minute: u32) -> Self {
        TimeOfDay(hour * 60 + minute)
    }

    /// Build from minutes since midnight. Fails for values past 23:59.
    pub fn from_minutes(minutes: Minutes) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SlotError::InvalidTime(format!(
                "{} minutes is past the end of the day",
                minutes
            )));
        }
        Ok(TimeOfDay(minutes))
    }

    /// Build from an hour (0..=23) and minute (0..=59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::InvalidTime(format!(
                "{:02}:{:02} is not a valid time of day",
                hour, minute
            )));
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    pub fn minutes(self) -> Minutes {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_minutes(self.0))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        parse_time(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(value: NaiveTime) -> Self {
        TimeOfDay(value.hour() * 60 + value.minute())
    }
}

/// Parse a strict `HH:MM` string.
///
/// # Errors
/// Returns `SlotError::InvalidTime` unless the input is exactly two digits,
/// a colon, and two digits, naming a real time of day.
pub fn parse_time(s: &str) -> Result<TimeOfDay> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit);
    if !shaped {
        return Err(SlotError::InvalidTime(format!(
            "'{}' is not in HH:MM form",
            s
        )));
    }

    NaiveTime::parse_from_str(s, "%H:%M")
        .map(TimeOfDay::from)
        .map_err(|e| SlotError::InvalidTime(format!("'{}': {}", s, e)))
}

/// Format minutes since midnight as zero-padded `HH:MM`.
pub fn format_minutes(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns `SlotError::InvalidDate` unless the input is exactly four digits,
/// a dash, two digits, a dash, and two digits, naming a real date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(SlotError::InvalidDate(format!(
            "'{}' is not in YYYY-MM-DD form",
            s
        )));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| SlotError::InvalidDate(format!("'{}': {}", s, e)))
}
