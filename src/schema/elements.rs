//! Validated `.gan` elements.
//!
//! These mirror the file's element structure one to one, with attribute values
//! already coerced and every repeatable element normalized to a `Vec`.

use crate::calendar::CalendarEventType;
use crate::task::{DependencyConstraint, DependencyHardness, TaskPriority};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectElement {
    pub name: String,
    pub company: String,
    pub web_link: String,
    pub view_date: NaiveDate,
    pub view_index: i32,
    pub gantt_divider_location: i32,
    pub resource_divider_location: i32,
    pub version: String,
    pub locale: String,
    pub description: Option<String>,
    pub views: Vec<ViewElement>,
    pub calendars: CalendarsElement,
    pub tasks: TaskSetElement,
    pub resources: Option<ResourceSetElement>,
    pub allocations: Option<Vec<AllocationElement>>,
    pub vacations: Option<Vec<VacationElement>>,
    pub previous: Option<Vec<BaselineElement>>,
    pub roles: Vec<RoleSetElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    pub id: String,
    pub name: String,
    pub width: i32,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionElement {
    pub id: String,
    pub value: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewElement {
    pub id: String,
    pub zooming_state: Option<String>,
    pub fields: Vec<FieldElement>,
    pub timeline: Option<String>,
    pub options: Vec<OptionElement>,
}

/// `<default-week>`; each day equal to `1` is a weekend day.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultWeekElement {
    pub id: String,
    pub name: String,
    pub sun: f64,
    pub mon: f64,
    pub tue: f64,
    pub wed: f64,
    pub thu: f64,
    pub fri: f64,
    pub sat: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTypesElement {
    pub day_type_ids: Vec<String>,
    pub default_week: DefaultWeekElement,
    pub only_show_weekends: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDateElement {
    pub year: Option<i32>,
    pub month: u32,
    pub date: u32,
    pub event_type: CalendarEventType,
    pub color: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarsElement {
    pub base_id: Option<String>,
    pub day_types: DayTypesElement,
    pub dates: Vec<CalendarDateElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPropertyElement {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub value_type: String,
    pub default_value: Option<String>,
    pub simple_select: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependElement {
    pub id: i32,
    pub constraint_type: DependencyConstraint,
    pub difference: i32,
    pub hardness: DependencyHardness,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPropertyElement {
    pub taskproperty_id: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskElement {
    pub id: i32,
    pub uid: String,
    pub name: String,
    pub color: Option<String>,
    pub shape: Option<String>,
    pub meeting: bool,
    pub project: Option<bool>,
    pub start: NaiveDate,
    pub duration: i64,
    pub complete: f64,
    pub third_date: Option<NaiveDate>,
    pub third_date_constraint: Option<i32>,
    pub priority: Option<TaskPriority>,
    pub web_link: Option<String>,
    pub expand: bool,
    pub cost_manual_value: Option<f64>,
    pub cost_calculated: Option<bool>,
    pub notes: Option<String>,
    pub depends: Vec<DependElement>,
    pub custom_properties: Vec<CustomPropertyElement>,
    pub tasks: Vec<TaskElement>,
    pub fixed_start: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSetElement {
    pub empty_milestones: bool,
    pub task_properties: Option<Vec<TaskPropertyElement>>,
    pub tasks: Vec<TaskElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPropertyDefinitionElement {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub default_value: Option<String>,
    pub ms_project_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateElement {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCustomPropertyElement {
    pub definition_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceElement {
    pub id: i32,
    pub name: String,
    pub function: String,
    pub contacts: String,
    pub phone: String,
    pub rate: Option<RateElement>,
    pub custom_properties: Vec<ResourceCustomPropertyElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSetElement {
    pub property_definitions: Vec<CustomPropertyDefinitionElement>,
    pub resources: Vec<ResourceElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationElement {
    pub task_id: i32,
    pub resource_id: i32,
    pub function: Option<String>,
    pub responsible: bool,
    pub load: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationElement {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub resource_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineTaskElement {
    pub id: i32,
    pub start: NaiveDate,
    pub duration: i64,
    pub meeting: bool,
    pub is_super: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineElement {
    pub name: String,
    pub tasks: Vec<BaselineTaskElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleElement {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSetElement {
    pub roleset_name: Option<String>,
    pub roles: Vec<RoleElement>,
}
