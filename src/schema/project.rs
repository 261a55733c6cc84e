use super::elements::*;
use super::fields::{Element, Issues, Rejection, decimal, optional_year, uri_component};
use crate::config::ParserConfig;
use crate::error::IssueKind;

/// Validate a nested element that may be absent, keeping "absent" and "invalid" apart.
fn nested<'v, T>(
    child: Option<Option<Element<'v>>>,
    issues: &mut Issues,
    validate: impl FnOnce(Element<'v>, &mut Issues) -> Option<T>,
) -> Option<Option<T>> {
    match child? {
        None => Some(None),
        Some(element) => validate(element, issues).map(Some),
    }
}

/// `@duration` in days, at most `config.max_task_duration`.
fn duration(el: &Element<'_>, issues: &mut Issues, config: &ParserConfig) -> Option<i64> {
    let max = config.max_task_duration;
    el.required("duration", issues, |raw| {
        let days = decimal::<i64>(raw)?;
        if days > max {
            return Err(Rejection {
                kind: IssueKind::InvalidNumber,
                message: format!("duration of {days} days exceeds the limit of {max}"),
            });
        }
        Ok(days)
    })
}

pub(super) fn project(
    el: Element<'_>,
    issues: &mut Issues,
    config: &ParserConfig,
) -> Option<ProjectElement> {
    let name = el.required_str("name", issues);
    let company = el.required_str("company", issues);
    let web_link = el.required_str("webLink", issues);
    let view_date = el.required_date("view-date", issues);
    let view_index = el.required_number("view-index", issues);
    let gantt_divider_location = el.required_number("gantt-divider-location", issues);
    let resource_divider_location = el.required_number("resource-divider-location", issues);
    let version = el.required_str("version", issues);
    let locale = el.required_str("locale", issues);
    let description = el.child_text("description", issues);
    let views = el.required_list("view", issues, view);
    let calendars = el
        .required_child("calendars", issues)
        .and_then(|child| calendars(child, issues));
    let tasks = el
        .required_child("tasks", issues)
        .and_then(|child| task_set(child, issues, config));

    let resources = el.blankable_child("resources", issues);
    let resources = nested(resources, issues, resource_set);
    let allocations = el.blankable_child("allocations", issues);
    let allocations = nested(allocations, issues, |child, issues| {
        child.required_list("allocation", issues, allocation)
    });
    let vacations = el.blankable_child("vacations", issues);
    let vacations = nested(vacations, issues, |child, issues| {
        child.required_list("vacation", issues, vacation)
    });
    let previous = el.blankable_child("previous", issues);
    let previous = nested(previous, issues, |child, issues| {
        child.list("previous-tasks", issues, |baseline_el, issues| {
            baseline(baseline_el, issues, config)
        })
    });
    let roles = el.required_list("roles", issues, role_set);

    Some(ProjectElement {
        name: name?,
        company: company?,
        web_link: web_link?,
        view_date: view_date?,
        view_index: view_index?,
        gantt_divider_location: gantt_divider_location?,
        resource_divider_location: resource_divider_location?,
        version: version?,
        locale: locale?,
        description: description?,
        views: views?,
        calendars: calendars?,
        tasks: tasks?,
        resources: resources?,
        allocations: allocations?,
        vacations: vacations?,
        previous: previous?,
        roles: roles?,
    })
}

fn view(el: Element<'_>, issues: &mut Issues) -> Option<ViewElement> {
    let id = el.required_str("id", issues);
    let zooming_state = el.optional_str("zooming-state", issues);
    let fields = el.list("field", issues, field);
    let timeline = el.child_text("timeline", issues);
    let options = el.list("option", issues, view_option);

    Some(ViewElement {
        id: id?,
        zooming_state: zooming_state?,
        fields: fields?,
        timeline: timeline?,
        options: options?,
    })
}

fn field(el: Element<'_>, issues: &mut Issues) -> Option<FieldElement> {
    let id = el.required_str("id", issues);
    let name = el.required_str("name", issues);
    let width = el.required_number("width", issues);
    let order = el.required_number("order", issues);
    Some(FieldElement {
        id: id?,
        name: name?,
        width: width?,
        order: order?,
    })
}

fn view_option(el: Element<'_>, issues: &mut Issues) -> Option<OptionElement> {
    let id = el.required_str("id", issues);
    let value = el.optional_str("value", issues);
    let text = el.text(issues);
    Some(OptionElement {
        id: id?,
        value: value?,
        text: text?,
    })
}

fn calendars(el: Element<'_>, issues: &mut Issues) -> Option<CalendarsElement> {
    let base_id = el.optional_str("base-id", issues);
    let day_types = el
        .required_child("day-types", issues)
        .and_then(|child| day_types(child, issues));
    let dates = el.list("date", issues, calendar_date);
    Some(CalendarsElement {
        base_id: base_id?,
        day_types: day_types?,
        dates: dates?,
    })
}

fn day_types(el: Element<'_>, issues: &mut Issues) -> Option<DayTypesElement> {
    let day_type_ids = el.list("day-type", issues, |child, issues| {
        child.required_str("id", issues)
    });
    let default_week = el
        .required_child("default-week", issues)
        .and_then(|child| default_week(child, issues));
    let only_show_weekends = el
        .required_child("only-show-weekends", issues)
        .and_then(|child| child.required_bool("value", issues));
    Some(DayTypesElement {
        day_type_ids: day_type_ids?,
        default_week: default_week?,
        only_show_weekends: only_show_weekends?,
    })
}

fn default_week(el: Element<'_>, issues: &mut Issues) -> Option<DefaultWeekElement> {
    let id = el.required_str("id", issues);
    let name = el.required_str("name", issues);
    let sun = el.required_number("sun", issues);
    let mon = el.required_number("mon", issues);
    let tue = el.required_number("tue", issues);
    let wed = el.required_number("wed", issues);
    let thu = el.required_number("thu", issues);
    let fri = el.required_number("fri", issues);
    let sat = el.required_number("sat", issues);
    Some(DefaultWeekElement {
        id: id?,
        name: name?,
        sun: sun?,
        mon: mon?,
        tue: tue?,
        wed: wed?,
        thu: thu?,
        fri: fri?,
        sat: sat?,
    })
}

fn calendar_date(el: Element<'_>, issues: &mut Issues) -> Option<CalendarDateElement> {
    let year = el.attribute("year", issues, optional_year).map(Option::flatten);
    let month = el.required_number("month", issues);
    let date = el.required_number("date", issues);
    let event_type = el.required_code("type", issues);
    let color = el.optional_str("color", issues);
    let text = el.text(issues);
    Some(CalendarDateElement {
        year: year?,
        month: month?,
        date: date?,
        event_type: event_type?,
        color: color?,
        text: text?,
    })
}

fn task_set(
    el: Element<'_>,
    issues: &mut Issues,
    config: &ParserConfig,
) -> Option<TaskSetElement> {
    let empty_milestones = el.required_bool("empty-milestones", issues);
    let task_properties = el.blankable_child("taskproperties", issues);
    let task_properties = nested(task_properties, issues, |child, issues| {
        child.required_list("taskproperty", issues, task_property)
    });
    let tasks = el.list("task", issues, |child, issues| task(child, issues, 1, config));
    Some(TaskSetElement {
        empty_milestones: empty_milestones?,
        task_properties: task_properties?,
        tasks: tasks?,
    })
}

fn task_property(el: Element<'_>, issues: &mut Issues) -> Option<TaskPropertyElement> {
    let id = el.required_str("id", issues);
    let name = el.required_str("name", issues);
    let property_type = el.required_str("type", issues);
    let value_type = el.required_str("valuetype", issues);
    let default_value = el.optional_str("defaultvalue", issues);
    let simple_select = el.optional_child("simple-select", issues);
    let simple_select = nested(simple_select, issues, |child, issues| {
        child.required_str("select", issues)
    });
    Some(TaskPropertyElement {
        id: id?,
        name: name?,
        property_type: property_type?,
        value_type: value_type?,
        default_value: default_value?,
        simple_select: simple_select?,
    })
}

/// `depth` is 1 for root tasks.
fn task(
    el: Element<'_>,
    issues: &mut Issues,
    depth: usize,
    config: &ParserConfig,
) -> Option<TaskElement> {
    if depth > config.max_task_depth {
        issues.push(
            el.path(),
            IssueKind::TooDeep,
            format!(
                "tasks are nested deeper than the limit of {}",
                config.max_task_depth
            ),
        );
        return None;
    }

    let id = el.required_number("id", issues);
    let uid = el.required_str("uid", issues);
    let name = el.required_str("name", issues);
    let color = el.optional_str("color", issues);
    let shape = el.optional_str("shape", issues);
    let meeting = el.required_bool("meeting", issues);
    let project = el.optional_bool("project", issues);
    let start = el.required_date("start", issues);
    let duration = duration(&el, issues, config);
    let complete = el.required_number("complete", issues);
    let third_date = el.optional_date("thirdDate", issues);
    let third_date_constraint = el.optional_number("thirdDate-constraint", issues);
    let priority = el.optional_code("priority", issues);
    let web_link = el.attribute("webLink", issues, uri_component);
    let expand = el.required_bool("expand", issues);
    let cost_manual_value = el.optional_number("cost-manual-value", issues);
    let cost_calculated = el.optional_bool("cost-calculated", issues);
    let notes = el.child_text("notes", issues);
    let depends = el.list("depend", issues, depend);
    let custom_properties = el.list("customproperty", issues, custom_property);
    let tasks = el.list("task", issues, |child, issues| {
        task(child, issues, depth + 1, config)
    });
    let fixed_start = el.optional_str("fixed-start", issues);

    Some(TaskElement {
        id: id?,
        uid: uid?,
        name: name?,
        color: color?,
        shape: shape?,
        meeting: meeting?,
        project: project?,
        start: start?,
        duration: duration?,
        complete: complete?,
        third_date: third_date?,
        third_date_constraint: third_date_constraint?,
        priority: priority?,
        web_link: web_link?,
        expand: expand?,
        cost_manual_value: cost_manual_value?,
        cost_calculated: cost_calculated?,
        notes: notes?,
        depends: depends?,
        custom_properties: custom_properties?,
        tasks: tasks?,
        fixed_start: fixed_start?,
    })
}

fn depend(el: Element<'_>, issues: &mut Issues) -> Option<DependElement> {
    let id = el.required_number("id", issues);
    let constraint_type = el.required_code("type", issues);
    let difference = el.required_number("difference", issues);
    let hardness = el.required_code("hardness", issues);
    Some(DependElement {
        id: id?,
        constraint_type: constraint_type?,
        difference: difference?,
        hardness: hardness?,
    })
}

fn custom_property(el: Element<'_>, issues: &mut Issues) -> Option<CustomPropertyElement> {
    let taskproperty_id = el.required_str("taskproperty-id", issues);
    let value = el.optional_str("value", issues);
    Some(CustomPropertyElement {
        taskproperty_id: taskproperty_id?,
        value: value?,
    })
}

fn resource_set(el: Element<'_>, issues: &mut Issues) -> Option<ResourceSetElement> {
    let property_definitions =
        el.list("custom-property-definition", issues, custom_property_definition);
    let resources = el.list("resource", issues, resource);
    Some(ResourceSetElement {
        property_definitions: property_definitions?,
        resources: resources?,
    })
}

fn custom_property_definition(
    el: Element<'_>,
    issues: &mut Issues,
) -> Option<CustomPropertyDefinitionElement> {
    let id = el.required_str("id", issues);
    let name = el.required_str("name", issues);
    let property_type = el.required_str("type", issues);
    let default_value = el.optional_str("default-value", issues);
    let ms_project_type = el.optional_str("MSPROJECT_TYPE", issues);
    Some(CustomPropertyDefinitionElement {
        id: id?,
        name: name?,
        property_type: property_type?,
        default_value: default_value?,
        ms_project_type: ms_project_type?,
    })
}

fn resource(el: Element<'_>, issues: &mut Issues) -> Option<ResourceElement> {
    let id = el.required_number("id", issues);
    let name = el.required_str("name", issues);
    let function = el.required_str("function", issues);
    let contacts = el.required_str("contacts", issues);
    let phone = el.required_str("phone", issues);
    let rate = el.optional_child("rate", issues);
    let rate = nested(rate, issues, |child, issues| {
        let name = child.required_str("name", issues);
        let value = child.required_number("value", issues);
        Some(RateElement {
            name: name?,
            value: value?,
        })
    });
    let custom_properties = el.list("custom-property", issues, |child, issues| {
        let definition_id = child.required_str("definition-id", issues);
        let value = child.required_str("value", issues);
        Some(ResourceCustomPropertyElement {
            definition_id: definition_id?,
            value: value?,
        })
    });
    Some(ResourceElement {
        id: id?,
        name: name?,
        function: function?,
        contacts: contacts?,
        phone: phone?,
        rate: rate?,
        custom_properties: custom_properties?,
    })
}

fn allocation(el: Element<'_>, issues: &mut Issues) -> Option<AllocationElement> {
    let task_id = el.required_number("task-id", issues);
    let resource_id = el.required_number("resource-id", issues);
    let function = el.optional_str("function", issues);
    let responsible = el.required_bool("responsible", issues);
    let load = el.required_number("load", issues);
    Some(AllocationElement {
        task_id: task_id?,
        resource_id: resource_id?,
        function: function?,
        responsible: responsible?,
        load: load?,
    })
}

fn vacation(el: Element<'_>, issues: &mut Issues) -> Option<VacationElement> {
    let start = el.required_date("start", issues);
    let end = el.required_date("end", issues);
    let resource_id = el.required_number("resourceid", issues);
    Some(VacationElement {
        start: start?,
        end: end?,
        resource_id: resource_id?,
    })
}

fn baseline(
    el: Element<'_>,
    issues: &mut Issues,
    config: &ParserConfig,
) -> Option<BaselineElement> {
    let name = el.required_str("name", issues);
    let tasks = el.list("previous-task", issues, |child, issues| {
        baseline_task(child, issues, config)
    });
    Some(BaselineElement {
        name: name?,
        tasks: tasks?,
    })
}

fn baseline_task(
    el: Element<'_>,
    issues: &mut Issues,
    config: &ParserConfig,
) -> Option<BaselineTaskElement> {
    let id = el.required_number("id", issues);
    let start = el.required_date("start", issues);
    let duration = duration(&el, issues, config);
    let meeting = el.required_bool("meeting", issues);
    let is_super = el.required_bool("super", issues);
    Some(BaselineTaskElement {
        id: id?,
        start: start?,
        duration: duration?,
        meeting: meeting?,
        is_super: is_super?,
    })
}

fn role_set(el: Element<'_>, issues: &mut Issues) -> Option<RoleSetElement> {
    let roleset_name = el.optional_str("roleset-name", issues);
    let roles = el.list("role", issues, |child, issues| {
        let id = child.required_str("id", issues);
        let name = child.required_str("name", issues);
        Some(RoleElement {
            id: id?,
            name: name?,
        })
    });
    Some(RoleSetElement {
        roleset_name: roleset_name?,
        roles: roles?,
    })
}
