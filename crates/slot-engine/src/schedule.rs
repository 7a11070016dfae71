//! Weekly working hours and the Schedule Resolver.
//!
//! A provider's week is a fixed seven-field structure, so every day is always
//! present. Resolving a calendar date picks that date's day through chrono's
//! locale-independent weekday, never through a formatted day name.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::time::{parse_date, Minutes, TimeOfDay};

/// Day names in Monday-first order, matching the keys used on the wire.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The wire name of a weekday (`Monday` .. `Sunday`).
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Working hours for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DaySchedule {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_day_off: bool,
}

impl DaySchedule {
    /// 09:00 to 18:00, working.
    pub fn working() -> Self {
        Self {
            start_time: TimeOfDay::hm(9, 0),
            end_time: TimeOfDay::hm(18, 0),
            is_day_off: false,
        }
    }

    /// Default hours, but flagged as a day off.
    pub fn day_off() -> Self {
        Self {
            is_day_off: true,
            ..Self::working()
        }
    }

    /// Working hours from `start` to `end`.
    pub fn open(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start_time: start,
            end_time: end,
            is_day_off: false,
        }
    }

    /// The bookable window for this day, or `None` on a day off.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSchedule` when a working day does not start
    /// strictly before it ends.
    pub fn window(&self) -> Result<Option<WorkingWindow>> {
        if self.is_day_off {
            return Ok(None);
        }
        WorkingWindow::new(self.start_time, self.end_time).map(Some)
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::working()
    }
}

/// An open working window, guaranteed `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingWindow {
    start_time: TimeOfDay,
    end_time: TimeOfDay,
}

impl WorkingWindow {
    /// # Errors
    /// Returns `SlotError::InvalidSchedule` unless `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidSchedule(format!(
                "start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self {
            start_time: start,
            end_time: end,
        })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start_time
    }

    pub fn end(&self) -> TimeOfDay {
        self.end_time
    }

    /// Length of the window in minutes.
    pub fn length(&self) -> Minutes {
        self.end_time.minutes() - self.start_time.minutes()
    }
}

/// A provider's working hours for each day of the week.
///
/// Days missing from incoming JSON take their defaults: Monday to Friday
/// 09:00-18:00, Saturday and Sunday off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeeklySchedule {
    #[serde(default = "DaySchedule::working")]
    pub monday: DaySchedule,
    #[serde(default = "DaySchedule::working")]
    pub tuesday: DaySchedule,
    #[serde(default = "DaySchedule::working")]
    pub wednesday: DaySchedule,
    #[serde(default = "DaySchedule::working")]
    pub thursday: DaySchedule,
    #[serde(default = "DaySchedule::working")]
    pub friday: DaySchedule,
    #[serde(default = "DaySchedule::day_off")]
    pub saturday: DaySchedule,
    #[serde(default = "DaySchedule::day_off")]
    pub sunday: DaySchedule,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            monday: DaySchedule::working(),
            tuesday: DaySchedule::working(),
            wednesday: DaySchedule::working(),
            thursday: DaySchedule::working(),
            friday: DaySchedule::working(),
            saturday: DaySchedule::day_off(),
            sunday: DaySchedule::day_off(),
        }
    }
}

impl WeeklySchedule {
    /// The same hours on every day of the week.
    pub fn uniform(day: DaySchedule) -> Self {
        Self {
            monday: day,
            tuesday: day,
            wednesday: day,
            thursday: day,
            friday: day,
            saturday: day,
            sunday: day,
        }
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Replace the days present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: &WeeklySchedulePatch) {
        for (weekday, day) in patch.days() {
            *self.day_mut(weekday) = day;
        }
    }
}

/// A partial schedule update. Each supplied day replaces the stored one whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeeklySchedulePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DaySchedule>,
}

impl WeeklySchedulePatch {
    /// The supplied days, Monday first.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, DaySchedule)> {
        [
            (Weekday::Mon, self.monday),
            (Weekday::Tue, self.tuesday),
            (Weekday::Wed, self.wednesday),
            (Weekday::Thu, self.thursday),
            (Weekday::Fri, self.friday),
            (Weekday::Sat, self.saturday),
            (Weekday::Sun, self.sunday),
        ]
        .into_iter()
        .filter_map(|(weekday, day)| day.map(|d| (weekday, d)))
    }
}

/// Outcome of resolving a date against a weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayResolution {
    Open(WorkingWindow),
    Closed,
}

impl DayResolution {
    pub fn window(&self) -> Option<WorkingWindow> {
        match self {
            DayResolution::Open(window) => Some(*window),
            DayResolution::Closed => None,
        }
    }
}

/// Resolve a calendar date to that weekday's working window.
///
/// # Errors
/// Returns `SlotError::InvalidSchedule` if the applicable working day has
/// `startTime >= endTime`.
pub fn resolve_day(schedule: &WeeklySchedule, date: NaiveDate) -> Result<DayResolution> {
    let weekday = date.weekday();
    let resolution = match schedule.day(weekday).window()? {
        Some(window) => DayResolution::Open(window),
        None => DayResolution::Closed,
    };
    debug!(%date, day = weekday_name(weekday), ?resolution, "resolved working day");
    Ok(resolution)
}

/// [`resolve_day`] for a `YYYY-MM-DD` string.
///
/// # Errors
/// Returns `SlotError::InvalidDate` for a malformed date, otherwise as [`resolve_day`].
pub fn resolve(schedule: &WeeklySchedule, date: &str) -> Result<DayResolution> {
    resolve_day(schedule, parse_date(date)?)
}
