use super::PersistenceResult;
use crate::codes::GanCode;
use crate::config::ParserConfig;
use crate::parser::parse_gan_str_with;
use crate::project::Project;
use crate::task::{Dependency, Task};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn load_project_from_gan<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    load_project_from_gan_with(path, &ParserConfig::default())
}

pub fn load_project_from_gan_with<P: AsRef<Path>>(
    path: P,
    config: &ParserConfig,
) -> PersistenceResult<Project> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading .gan file");
    let xml = fs::read_to_string(path)?;
    Ok(parse_gan_str_with(&xml, config)?)
}

pub fn project_to_json_string(project: &Project) -> PersistenceResult<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

pub fn save_project_to_json<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, project)?;
    Ok(())
}

#[derive(Serialize)]
struct TaskCsvRecord<'a> {
    id: i32,
    parent_id: String,
    depth: usize,
    name: &'a str,
    start_date: String,
    end_date: String,
    duration_days: i64,
    completion_percentage: f64,
    priority: &'static str,
    is_milestone: bool,
    dependencies: String,
}

impl<'a> TaskCsvRecord<'a> {
    fn new(task: &'a Task, parent: Option<&Task>, depth: usize) -> Self {
        Self {
            id: task.id,
            parent_id: format_option_i32(parent.map(|parent| parent.id)),
            depth,
            name: &task.name,
            start_date: format_date(task.start_date()),
            end_date: format_date(task.end_date()),
            duration_days: task.duration_in_days(),
            completion_percentage: task.completion_percentage,
            priority: task.priority.code(),
            is_milestone: task.is_milestone,
            dependencies: join_dependencies(&task.dependencies),
        }
    }
}

/// Write one row per task, parents before their subtasks.
pub fn write_tasks_csv<W: Write>(project: &Project, writer: W) -> PersistenceResult<()> {
    let mut records = Vec::with_capacity(project.task_count());
    push_records(&project.task_set.tasks, None, 0, &mut records);

    let mut writer = csv::Writer::from_writer(writer);
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn push_records<'a>(
    tasks: &'a [Task],
    parent: Option<&Task>,
    depth: usize,
    records: &mut Vec<TaskCsvRecord<'a>>,
) {
    for task in tasks {
        records.push(TaskCsvRecord::new(task, parent, depth));
        push_records(&task.subtasks, Some(task), depth + 1, records);
    }
}

pub fn save_tasks_to_csv<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    write_tasks_csv(project, file)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_option_i32(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn join_dependencies(dependencies: &[Dependency]) -> String {
    dependencies
        .iter()
        .map(|dep| {
            format!(
                "{}:{}:{}:{}",
                dep.successor_task_id,
                dep.constraint_type.code(),
                dep.lag_in_days,
                dep.hardness_type.code()
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}
