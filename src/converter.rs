//! Mapping of validated elements onto the domain model.
//!
//! The calendar is built first because every task and baseline task needs it
//! to derive its end date.

use crate::baseline::{Baseline, BaselineTask};
use crate::calendar::{Calendar, CalendarEvent, DayTypeConfiguration, DefaultWeek, WeekendDays};
use crate::config::ParserConfig;
use crate::error::CalendarError;
use crate::project::{Project, View, ViewField, ViewOption};
use crate::resource::{
    Allocation, CustomPropertyDefinition, Rate, Resource, ResourceCustomProperty, ResourceSet,
    Role, RoleSet, Vacation,
};
use crate::schema::elements::*;
use crate::task::{CustomProperty, Dependency, Task, TaskProperty, TaskSet};
use chrono::NaiveDate;

/// Build a [`Project`] from a validated `<project>` element.
///
/// Only end date computation can fail here.
pub fn convert_project(
    element: ProjectElement,
    config: &ParserConfig,
) -> Result<Project, CalendarError> {
    let calendar = convert_calendar(element.calendars);
    let converter = Converter {
        calendar: &calendar,
        max_non_working_run: config.max_non_working_run,
    };

    let task_set = converter.task_set(element.tasks)?;
    let baselines = element
        .previous
        .unwrap_or_default()
        .into_iter()
        .map(|baseline| converter.baseline(baseline))
        .collect::<Result<Vec<_>, _>>()?;

    let resource_set = element
        .resources
        .map(convert_resource_set)
        .unwrap_or_default();
    let allocations = element
        .allocations
        .unwrap_or_default()
        .into_iter()
        .map(|allocation| Allocation {
            task_id: allocation.task_id,
            resource_id: allocation.resource_id,
            role: allocation.function,
            is_coordinator: allocation.responsible,
            workload_percentage: allocation.load,
        })
        .collect();
    let vacations = element
        .vacations
        .unwrap_or_default()
        .into_iter()
        .map(|vacation| Vacation {
            resource_id: vacation.resource_id,
            start_date: vacation.start,
            end_date: vacation.end,
        })
        .collect();

    tracing::debug!(
        name = %element.name,
        root_tasks = task_set.tasks.len(),
        baselines = baselines.len(),
        "converted project"
    );

    Ok(Project {
        name: element.name,
        company: element.company,
        web_link: element.web_link,
        view_date: element.view_date,
        view_index: element.view_index,
        gantt_divider_location: element.gantt_divider_location,
        resource_divider_location: element.resource_divider_location,
        version: element.version,
        locale: element.locale,
        description: element.description,
        views: element.views.into_iter().map(convert_view).collect(),
        calendar,
        task_set,
        resource_set,
        allocations,
        vacations,
        baselines,
        role_sets: element.roles.into_iter().map(convert_role_set).collect(),
    })
}

/// Conversion state shared by everything that derives end dates.
struct Converter<'c> {
    calendar: &'c Calendar,
    max_non_working_run: u32,
}

impl Converter<'_> {
    /// A task lasting `n` days ends `n - 1` workdays after its start.
    fn end_date(
        &self,
        start: NaiveDate,
        duration_in_days: i64,
    ) -> Result<NaiveDate, CalendarError> {
        self.calendar.add_workdays_capped(
            start,
            duration_in_days.saturating_sub(1),
            self.max_non_working_run,
        )
    }

    fn task_set(&self, element: TaskSetElement) -> Result<TaskSet, CalendarError> {
        let task_properties = element
            .task_properties
            .unwrap_or_default()
            .into_iter()
            .map(|property| TaskProperty {
                id: property.id,
                name: property.name,
                property_type: property.property_type,
                value_type: property.value_type,
                default_value: property.default_value,
                calculation_selected_field: property.simple_select,
            })
            .collect();
        let tasks = element
            .tasks
            .into_iter()
            .map(|task| self.task(task))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TaskSet {
            allow_empty_milestones: element.empty_milestones,
            task_properties,
            tasks,
        })
    }

    // Recursion depth is bounded by the validator's task depth limit.
    fn task(&self, element: TaskElement) -> Result<Task, CalendarError> {
        let end_date = self.end_date(element.start, element.duration)?;
        tracing::trace!(id = element.id, start = %element.start, %end_date, "converted task");

        let subtasks = element
            .tasks
            .into_iter()
            .map(|child| self.task(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Task {
            id: element.id,
            uid: element.uid,
            name: element.name,
            color: element.color,
            shape: element.shape,
            is_milestone: element.meeting,
            is_project_task: element.project.unwrap_or(false),
            start_date: element.start,
            end_date,
            duration_in_days: element.duration,
            completion_percentage: element.complete,
            earliest_start_date: element.third_date,
            is_earliest_start_date_enabled: element.third_date_constraint == Some(1),
            priority: element.priority.unwrap_or_default(),
            web_link: element.web_link,
            is_expanded: element.expand,
            manual_cost: element.cost_manual_value,
            is_cost_calculated: element.cost_calculated.unwrap_or(false),
            notes: element.notes,
            dependencies: element
                .depends
                .into_iter()
                .map(|depend| Dependency {
                    successor_task_id: depend.id,
                    constraint_type: depend.constraint_type,
                    lag_in_days: depend.difference,
                    hardness_type: depend.hardness,
                })
                .collect(),
            custom_properties: element
                .custom_properties
                .into_iter()
                .map(|property| CustomProperty {
                    property_id: property.taskproperty_id,
                    value: property.value,
                })
                .collect(),
            subtasks,
            legacy_fixed_start: element.fixed_start,
        })
    }

    fn baseline(&self, element: BaselineElement) -> Result<Baseline, CalendarError> {
        let tasks = element
            .tasks
            .into_iter()
            .map(|task| {
                Ok(BaselineTask {
                    id: task.id,
                    start_date: task.start,
                    end_date: self.end_date(task.start, task.duration)?,
                    duration_in_days: task.duration,
                    is_milestone: task.meeting,
                    is_summary: task.is_super,
                })
            })
            .collect::<Result<Vec<_>, CalendarError>>()?;

        Ok(Baseline {
            name: element.name,
            tasks,
        })
    }
}

fn convert_calendar(element: CalendarsElement) -> Calendar {
    let week = element.day_types.default_week;
    Calendar {
        base_id: element.base_id,
        day_type_config: DayTypeConfiguration {
            type_ids: element.day_types.day_type_ids,
            default_week: DefaultWeek {
                id: week.id,
                name: week.name,
                weekend_days: WeekendDays {
                    sunday: week.sun == 1.0,
                    monday: week.mon == 1.0,
                    tuesday: week.tue == 1.0,
                    wednesday: week.wed == 1.0,
                    thursday: week.thu == 1.0,
                    friday: week.fri == 1.0,
                    saturday: week.sat == 1.0,
                },
            },
            is_task_runnable_on_weekends: element.day_types.only_show_weekends,
        },
        events: element
            .dates
            .into_iter()
            .map(|date| CalendarEvent {
                year: date.year,
                month: date.month,
                day: date.date,
                event_type: date.event_type,
                color: date.color,
                description: date.text,
            })
            .collect(),
    }
}

fn convert_view(element: ViewElement) -> View {
    View {
        id: element.id,
        zoom_state: element.zooming_state,
        fields: element
            .fields
            .into_iter()
            .map(|field| ViewField {
                id: field.id,
                name: field.name,
                width: field.width,
                order: field.order,
            })
            .collect(),
        timeline: element.timeline,
        options: element
            .options
            .into_iter()
            .map(|option| ViewOption {
                id: option.id,
                value: option.value,
                text: option.text,
            })
            .collect(),
    }
}

fn convert_resource_set(element: ResourceSetElement) -> ResourceSet {
    ResourceSet {
        property_definitions: element
            .property_definitions
            .into_iter()
            .map(|definition| CustomPropertyDefinition {
                id: definition.id,
                name: definition.name,
                property_type: definition.property_type,
                default_value: definition.default_value,
                ms_project_type: definition.ms_project_type,
            })
            .collect(),
        resources: element.resources.into_iter().map(convert_resource).collect(),
    }
}

fn convert_resource(element: ResourceElement) -> Resource {
    Resource {
        id: element.id,
        name: element.name,
        // "Default:0" is the file's placeholder for "no role" and stays as is
        role: element.function,
        email: element.contacts,
        phone: element.phone,
        rate: element.rate.map(|rate| Rate {
            name: rate.name,
            value: rate.value,
        }),
        custom_properties: element
            .custom_properties
            .into_iter()
            .map(|property| ResourceCustomProperty {
                definition_id: property.definition_id,
                value: property.value,
            })
            .collect(),
    }
}

fn convert_role_set(element: RoleSetElement) -> RoleSet {
    RoleSet {
        name: element.roleset_name,
        roles: element
            .roles
            .into_iter()
            .map(|role| Role {
                id: role.id,
                name: role.name,
            })
            .collect(),
    }
}
