use crate::calendar::Calendar;
use crate::codes::GanCode;
use crate::error::CalendarError;
use crate::project::Project;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TaskPriority {
    #[serde(rename = "3")]
    Lowest,
    #[serde(rename = "0")]
    Low,
    #[default]
    #[serde(rename = "1")]
    Normal,
    #[serde(rename = "2")]
    High,
    #[serde(rename = "4")]
    Highest,
}

impl GanCode for TaskPriority {
    const KIND: &'static str = "task priority";
    const ALL: &'static [Self] = &[
        Self::Lowest,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::Highest,
    ];

    fn code(self) -> &'static str {
        match self {
            TaskPriority::Lowest => "3",
            TaskPriority::Low => "0",
            TaskPriority::Normal => "1",
            TaskPriority::High => "2",
            TaskPriority::Highest => "4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DependencyConstraint {
    #[serde(rename = "1")]
    StartStart,
    #[serde(rename = "2")]
    FinishStart,
    #[serde(rename = "3")]
    FinishFinish,
    #[serde(rename = "4")]
    StartFinish,
}

impl GanCode for DependencyConstraint {
    const KIND: &'static str = "dependency constraint type";
    const ALL: &'static [Self] = &[
        Self::StartStart,
        Self::FinishStart,
        Self::FinishFinish,
        Self::StartFinish,
    ];

    fn code(self) -> &'static str {
        match self {
            DependencyConstraint::StartStart => "1",
            DependencyConstraint::FinishStart => "2",
            DependencyConstraint::FinishFinish => "3",
            DependencyConstraint::StartFinish => "4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DependencyHardness {
    Strong,
    Rubber,
}

impl GanCode for DependencyHardness {
    const KIND: &'static str = "dependency hardness";
    const ALL: &'static [Self] = &[Self::Strong, Self::Rubber];

    fn code(self) -> &'static str {
        match self {
            DependencyHardness::Strong => "Strong",
            DependencyHardness::Rubber => "Rubber",
        }
    }
}

macro_rules! display_as_code {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.code())
                }
            }
        )*
    };
}

display_as_code!(TaskPriority, DependencyConstraint, DependencyHardness);

/// A link from the owning task to a successor. Descriptive only, nothing is propagated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub successor_task_id: i32,
    pub constraint_type: DependencyConstraint,
    pub lag_in_days: i32,
    pub hardness_type: DependencyHardness,
}

/// A task's value for a custom column defined by a [`TaskProperty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomProperty {
    pub property_id: String,
    pub value: Option<String>,
}

/// A task column definition, either built-in (`tpd*`) or custom (`tpc*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskProperty {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub value_type: String,
    pub default_value: Option<String>,
    pub calculation_selected_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i32,
    pub uid: String,
    pub name: String,
    pub color: Option<String>,
    pub shape: Option<String>,
    pub is_milestone: bool,
    pub is_project_task: bool,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    pub(crate) duration_in_days: i64,
    pub completion_percentage: f64,
    pub earliest_start_date: Option<NaiveDate>,
    pub is_earliest_start_date_enabled: bool,
    pub priority: TaskPriority,
    pub web_link: Option<String>,
    pub is_expanded: bool,
    pub manual_cost: Option<f64>,
    pub is_cost_calculated: bool,
    pub notes: Option<String>,
    pub dependencies: Vec<Dependency>,
    pub custom_properties: Vec<CustomProperty>,
    pub subtasks: Vec<Task>,
    pub legacy_fixed_start: Option<String>,
}

impl Task {
    /// Create a task whose end date is derived from `calendar`.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        start_date: NaiveDate,
        duration_in_days: i64,
        calendar: &Calendar,
    ) -> Result<Self, CalendarError> {
        let end_date = calendar.add_workdays(start_date, duration_in_days.saturating_sub(1))?;
        Ok(Self {
            id,
            uid: String::new(),
            name: name.into(),
            color: None,
            shape: None,
            is_milestone: false,
            is_project_task: false,
            start_date,
            end_date,
            duration_in_days,
            completion_percentage: 0.0,
            earliest_start_date: None,
            is_earliest_start_date_enabled: false,
            priority: TaskPriority::Normal,
            web_link: None,
            is_expanded: true,
            manual_cost: None,
            is_cost_calculated: false,
            notes: None,
            dependencies: Vec::new(),
            custom_properties: Vec::new(),
            subtasks: Vec::new(),
            legacy_fixed_start: None,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last workday of the task, derived from start, duration and the project calendar.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn duration_in_days(&self) -> i64 {
        self.duration_in_days
    }

    pub fn is_summary(&self) -> bool {
        !self.subtasks.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskSet {
    pub allow_empty_milestones: bool,
    pub task_properties: Vec<TaskProperty>,
    /// Root tasks only; children live under [`Task::subtasks`].
    pub tasks: Vec<Task>,
}

/// Visit every task of the project in depth-first pre-order.
///
/// The visitor gets the parent (if any) and the task, and returns `false` to
/// skip the task's subtasks.
pub fn walk_tasks_depth_first<'a, F>(project: &'a Project, mut visitor: F)
where
    F: FnMut(Option<&'a Task>, &'a Task) -> bool,
{
    let mut stack: Vec<(Option<&'a Task>, &'a Task)> = project
        .task_set
        .tasks
        .iter()
        .rev()
        .map(|task| (None, task))
        .collect();

    while let Some((parent, task)) = stack.pop() {
        if visitor(parent, task) {
            stack.extend(task.subtasks.iter().rev().map(|child| (Some(task), child)));
        }
    }
}

pub fn collect_tasks_depth_first(project: &Project) -> Vec<&Task> {
    let mut tasks = Vec::new();
    walk_tasks_depth_first(project, |_, task| {
        tasks.push(task);
        true
    });
    tasks
}
