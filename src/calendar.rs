use crate::codes::GanCode;
use crate::error::CalendarError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Consecutive non-working days after which workday advancement gives up.
pub const DEFAULT_MAX_NON_WORKING_RUN: u32 = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarEventType {
    #[serde(rename = "HOLIDAY")]
    Holiday,
    #[serde(rename = "WORKING_DAY")]
    WorkingDay,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl GanCode for CalendarEventType {
    const KIND: &'static str = "calendar event type";
    const ALL: &'static [Self] = &[Self::Holiday, Self::WorkingDay, Self::Neutral];

    fn code(self) -> &'static str {
        match self {
            CalendarEventType::Holiday => "HOLIDAY",
            CalendarEventType::WorkingDay => "WORKING_DAY",
            CalendarEventType::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for CalendarEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which days of the week are weekend days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendDays {
    pub sunday: bool,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
}

impl WeekendDays {
    /// Saturday and Sunday off, the GanttProject default.
    pub fn saturday_sunday() -> Self {
        Self {
            saturday: true,
            sunday: true,
            ..Self::default()
        }
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Sun => self.sunday,
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultWeek {
    pub id: String,
    pub name: String,
    pub weekend_days: WeekendDays,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTypeConfiguration {
    pub type_ids: Vec<String>,
    pub default_week: DefaultWeek,
    /// When set, weekend days count as workdays during advancement.
    pub is_task_runnable_on_weekends: bool,
}

/// A holiday, working day or neutral annotation on a month/day.
///
/// Events without a year recur every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub year: Option<i32>,
    pub month: u32,
    pub day: u32,
    pub event_type: CalendarEventType,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.year.is_none_or(|year| year == date.year())
            && self.month == date.month()
            && self.day == date.day()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub base_id: Option<String>,
    pub day_type_config: DayTypeConfiguration,
    pub events: Vec<CalendarEvent>,
}

impl Calendar {
    /// Check if some holiday event falls on the date
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.events
            .iter()
            .any(|event| event.event_type == CalendarEventType::Holiday && event.matches(date))
    }

    /// Check if the date's weekday is flagged as a weekend day
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.day_type_config
            .default_week
            .weekend_days
            .contains(date.weekday())
    }

    /// Check if a date counts towards a task's duration
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        !self.is_holiday(date)
            && (self.day_type_config.is_task_runnable_on_weekends || !self.is_weekend(date))
    }

    /// Find the date `days` workdays after `start`.
    ///
    /// `start` itself is never counted, and `days <= 0` returns `start` unchanged.
    /// A task lasting `n` days ends on `add_workdays(start, n - 1)`.
    pub fn add_workdays(&self, start: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
        self.add_workdays_capped(start, days, DEFAULT_MAX_NON_WORKING_RUN)
    }

    /// Same as [`Calendar::add_workdays`], failing once `max_non_working_run`
    /// consecutive days in a row turned out not to be workdays.
    pub fn add_workdays_capped(
        &self,
        start: NaiveDate,
        days: i64,
        max_non_working_run: u32,
    ) -> Result<NaiveDate, CalendarError> {
        let mut current = start;
        let mut count = 0;
        let mut non_working_run = 0u32;

        while count < days {
            current = current
                .succ_opt()
                .ok_or(CalendarError::DateOutOfRange { start })?;
            if self.is_workday(current) {
                count += 1;
                non_working_run = 0;
            } else {
                non_working_run += 1;
                if non_working_run >= max_non_working_run {
                    tracing::warn!(
                        %start,
                        days,
                        non_working_run,
                        "calendar has no workday in reach, giving up"
                    );
                    return Err(CalendarError::NoWorkdayFound {
                        start,
                        searched_days: non_working_run,
                    });
                }
            }
        }
        Ok(current)
    }
}
