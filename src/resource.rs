use chrono::NaiveDate;
use serde::Serialize;

/// Pay rate of a resource, e.g. `standard` at 64 per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rate {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceCustomProperty {
    pub definition_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomPropertyDefinition {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub default_value: Option<String>,
    pub ms_project_type: Option<String>,
}

/// A person or piece of equipment that can be allocated to tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: i32,
    pub name: String,
    /// Role reference as stored in the file. A resource without an explicit
    /// role carries the placeholder `Default:0`, kept as is.
    pub role: String,
    pub email: String,
    pub phone: String,
    pub rate: Option<Rate>,
    pub custom_properties: Vec<ResourceCustomProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceSet {
    pub property_definitions: Vec<CustomPropertyDefinition>,
    pub resources: Vec<Resource>,
}

/// Assignment of a resource to a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub task_id: i32,
    pub resource_id: i32,
    pub role: Option<String>,
    pub is_coordinator: bool,
    /// 0-100, not checked against the resource's other allocations.
    pub workload_percentage: f64,
}

/// Days off of a single resource. Informational, ignored by end date computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vacation {
    pub resource_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleSet {
    pub name: Option<String>,
    pub roles: Vec<Role>,
}
