use crate::calendar::Calendar;
use crate::error::CalendarError;
use chrono::NaiveDate;
use serde::Serialize;

/// A task as it was when the baseline was captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaselineTask {
    pub id: i32,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    pub(crate) duration_in_days: i64,
    pub is_milestone: bool,
    /// The task had subtasks when the baseline was taken.
    pub is_summary: bool,
}

impl BaselineTask {
    pub fn new(
        id: i32,
        start_date: NaiveDate,
        duration_in_days: i64,
        calendar: &Calendar,
    ) -> Result<Self, CalendarError> {
        Ok(Self {
            id,
            start_date,
            end_date: calendar.add_workdays(start_date, duration_in_days.saturating_sub(1))?,
            duration_in_days,
            is_milestone: false,
            is_summary: false,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn duration_in_days(&self) -> i64 {
        self.duration_in_days
    }
}

/// A named snapshot; its tasks are a flat list even for nested projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Baseline {
    pub name: String,
    pub tasks: Vec<BaselineTask>,
}
