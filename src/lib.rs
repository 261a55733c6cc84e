//! Parser and validator for GanttProject `.gan` files.
//!
//! [`parse_gan_str`] turns the XML text into a [`Project`]. Task and baseline
//! end dates are derived from the project [`Calendar`] while converting.

pub mod baseline;
pub mod calendar;
pub mod codes;
pub mod config;
pub mod converter;
pub mod error;
pub mod parser;
pub mod persistence;
pub mod project;
pub mod resource;
pub mod schema;
pub mod task;
pub mod xml;

pub use baseline::{Baseline, BaselineTask};
pub use calendar::{Calendar, CalendarEvent, CalendarEventType, DayTypeConfiguration, WeekendDays};
pub use codes::GanCode;
pub use config::ParserConfig;
pub use error::{
    CalendarError, GanError, GanResult, IssueKind, ValidationError, ValidationIssue, XmlError,
};
pub use parser::{parse_gan_str, parse_gan_str_with};
pub use project::Project;
pub use resource::{Allocation, Resource, ResourceSet, RoleSet, Vacation};
pub use task::{
    Dependency, DependencyConstraint, DependencyHardness, Task, TaskPriority, TaskSet,
    collect_tasks_depth_first, walk_tasks_depth_first,
};
