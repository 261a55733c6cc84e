use anyhow::Context;
use clap::Parser;
use gan_parser::persistence::{
    PersistenceError, load_project_from_gan_with, project_to_json_string, save_project_to_json,
    save_tasks_to_csv,
};
use gan_parser::{ParserConfig, Project, Task, walk_tasks_depth_first};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Inspect a GanttProject `.gan` file.
#[derive(Parser, Debug)]
#[command(name = "gan", version, about)]
struct Cli {
    /// The .gan file to read
    path: PathBuf,

    /// Print the whole project as JSON instead of the task table
    #[arg(long)]
    json: bool,

    /// Write the whole project as JSON to this file
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the task list as CSV to this file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Parser limits as JSON, e.g. {"max_task_depth": 64}
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ParserConfig> {
    let Some(path) = path else {
        return Ok(ParserConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn render_tasks_as_text_table(project: &Project) -> String {
    let headers = ["id", "name", "start", "end", "days", "done %", "priority"];
    let mut rows: Vec<[String; 7]> = Vec::new();
    let mut ancestors: Vec<&Task> = Vec::new();
    walk_tasks_depth_first(project, |parent, task| {
        // pre-order: unwind to this task's parent
        match parent {
            None => ancestors.clear(),
            Some(parent) => {
                while ancestors.last().is_some_and(|last| !std::ptr::eq(*last, parent)) {
                    ancestors.pop();
                }
            }
        }
        let depth = ancestors.len();
        ancestors.push(task);
        rows.push([
            task.id.to_string(),
            format!("{}{}", "  ".repeat(depth), task.name),
            task.start_date().to_string(),
            task.end_date().to_string(),
            task.duration_in_days().to_string(),
            task.completion_percentage.to_string(),
            format!("{:?}", task.priority),
        ]);
        true
    });

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, headers.iter().copied(), &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.zip(widths) {
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
        out.push_str(" |");
    }
    out.push('\n');
}

fn print_summary(project: &Project) {
    println!("Project:   {}", project.name);
    println!("Company:   {}", project.company);
    println!("Version:   {}", project.version);
    println!(
        "Tasks:     {} ({} at top level)",
        project.task_count(),
        project.task_set.tasks.len()
    );
    println!("Resources: {}", project.resource_set.resources.len());
    println!("Baselines: {}", project.baselines.len());
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let project = load_project_from_gan_with(&cli.path, &config)?;

    if cli.json {
        println!("{}", project_to_json_string(&project)?);
    } else {
        print_summary(&project);
        if project.task_count() > 0 {
            println!();
            print!("{}", render_tasks_as_text_table(&project));
        }
    }

    if let Some(path) = &cli.output {
        save_project_to_json(&project, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "project written as JSON");
    }
    if let Some(path) = &cli.csv {
        save_tasks_to_csv(&project, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "tasks written as CSV");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if let Some(PersistenceError::Gan(gan)) = err.downcast_ref::<PersistenceError>() {
                for issue in gan.issues().unwrap_or_default() {
                    eprintln!("  {issue}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
