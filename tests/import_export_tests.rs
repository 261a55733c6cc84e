use gan_parser::persistence::{
    PersistenceError, load_project_from_gan, load_project_from_gan_with, project_to_json_string,
    save_project_to_json, save_tasks_to_csv, write_tasks_csv,
};
use gan_parser::{GanError, ParserConfig, parse_gan_str};
use std::io::Write;
use tempfile::NamedTempFile;

const TASK_WITH_DETAILS: &str = include_str!("data/task-with-details.gan");
const TASK_WITH_SUBTASKS: &str = include_str!("data/task-with-subtasks.gan");
const TASK_WITH_DEPENDENCIES: &str = include_str!("data/task-with-dependencies.gan");
const INVALID_FIELDS: &str = include_str!("data/invalid-fields.gan");

fn gan_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_reads_and_parses_a_file() {
    let file = gan_file(TASK_WITH_SUBTASKS);
    let project = load_project_from_gan(file.path()).unwrap();
    assert_eq!(project, parse_gan_str(TASK_WITH_SUBTASKS).unwrap());
}

#[test]
fn load_honors_the_parser_config() {
    let file = gan_file(TASK_WITH_SUBTASKS);
    let config = ParserConfig::default().with_max_task_depth(1);
    let err = load_project_from_gan_with(file.path(), &config).unwrap_err();
    assert!(matches!(err, PersistenceError::Gan(GanError::Validation(_))));
}

#[test]
fn load_reports_missing_files_as_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_project_from_gan(dir.path().join("missing.gan")).unwrap_err();
    assert!(matches!(err, PersistenceError::Io(_)));
}

#[test]
fn load_passes_validation_issues_through() {
    let file = gan_file(INVALID_FIELDS);
    match load_project_from_gan(file.path()).unwrap_err() {
        PersistenceError::Gan(err) => assert_eq!(err.issues().unwrap().len(), 6),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn json_export_uses_format_codes_and_iso_dates() {
    let project = parse_gan_str(TASK_WITH_DETAILS).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&project_to_json_string(&project).unwrap()).unwrap();

    let task = &json["task_set"]["tasks"][0];
    assert_eq!(task["start_date"], "2024-01-04");
    assert_eq!(task["end_date"], "2024-01-08");
    assert_eq!(task["duration_in_days"], 3);
    assert_eq!(task["priority"], "2");
    assert_eq!(task["manual_cost"], 64.0);
    assert_eq!(json["task_set"]["tasks"][1]["priority"], "1");
    assert_eq!(json["name"], "task with details");
}

#[test]
fn json_file_matches_the_string_export() {
    let project = parse_gan_str(TASK_WITH_DEPENDENCIES).unwrap();
    let file = NamedTempFile::new().unwrap();
    save_project_to_json(&project, file.path()).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    let expected: serde_json::Value =
        serde_json::from_str(&project_to_json_string(&project).unwrap()).unwrap();
    assert_eq!(written, expected);

    let dependency = &written["task_set"]["tasks"][2]["dependencies"][0];
    assert_eq!(dependency["constraint_type"], "3");
    assert_eq!(dependency["hardness_type"], "Strong");
    assert_eq!(dependency["lag_in_days"], -1);
}

#[test]
fn csv_has_one_row_per_task_in_walk_order() {
    let project = parse_gan_str(TASK_WITH_SUBTASKS).unwrap();
    let mut buffer = Vec::new();
    write_tasks_csv(&project, &mut buffer).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "id",
            "parent_id",
            "depth",
            "name",
            "start_date",
            "end_date",
            "duration_days",
            "completion_percentage",
            "priority",
            "is_milestone",
            "dependencies",
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 6);
    let row = |idx: usize| rows[idx].iter().take(6).collect::<Vec<_>>();
    assert_eq!(row(0), vec!["0", "", "0", "task A", "2024-01-08", "2024-01-12"]);
    assert_eq!(row(3), vec!["3", "2", "2", "task Ab1", "2024-01-10", "2024-01-12"]);
    assert_eq!(row(5), vec!["5", "4", "1", "task Bb", "2024-01-15", "2024-01-15"]);
}

#[test]
fn csv_file_lists_dependencies() {
    let project = parse_gan_str(TASK_WITH_DEPENDENCIES).unwrap();
    let file = NamedTempFile::new().unwrap();
    save_tasks_to_csv(&project, file.path()).unwrap();

    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    let dependencies: Vec<String> = reader
        .records()
        .map(|record| record.unwrap()[10].to_string())
        .collect();
    assert_eq!(
        dependencies,
        vec!["1:1:0:Strong", "2:2:0:Rubber", "3:3:-1:Strong", "4:4:0:Strong", ""]
    );
}
