use crate::baseline::Baseline;
use crate::calendar::Calendar;
use crate::resource::{Allocation, ResourceSet, RoleSet, Vacation};
use crate::task::TaskSet;
use chrono::NaiveDate;
use serde::Serialize;

/// A column of a chart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewField {
    pub id: String,
    pub name: String,
    pub width: i32,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOption {
    pub id: String,
    pub value: Option<String>,
    pub text: Option<String>,
}

/// UI state of the Gantt chart or resource chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub id: String,
    pub zoom_state: Option<String>,
    pub fields: Vec<ViewField>,
    pub timeline: Option<String>,
    pub options: Vec<ViewOption>,
}

/// A parsed `.gan` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
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
    pub views: Vec<View>,
    pub calendar: Calendar,
    pub task_set: TaskSet,
    pub resource_set: ResourceSet,
    pub allocations: Vec<Allocation>,
    pub vacations: Vec<Vacation>,
    pub baselines: Vec<Baseline>,
    pub role_sets: Vec<RoleSet>,
}

impl Project {
    /// Number of tasks at every nesting level.
    pub fn task_count(&self) -> usize {
        crate::task::collect_tasks_depth_first(self).len()
    }
}
