use crate::config::ParserConfig;
use crate::converter::convert_project;
use crate::error::{GanResult, XmlError};
use crate::project::Project;
use crate::schema::validate_project;
use crate::xml::parse_document;

/// `<project>` and `<tasks>` above root tasks, plus the first task past the
/// depth limit and its own children.
const TASK_NESTING_OFFSET: usize = 4;

/// Parse the contents of a `.gan` file with the default limits.
///
/// ```
/// let xml = std::fs::read_to_string("tests/data/empty-project.gan").unwrap();
/// let project = gan_parser::parse_gan_str(&xml).unwrap();
/// assert_eq!(project.task_count(), 0);
/// ```
pub fn parse_gan_str(xml: &str) -> GanResult<Project> {
    parse_gan_str_with(xml, &ParserConfig::default())
}

/// Parse the contents of a `.gan` file.
///
/// Fails with [`crate::GanError::Xml`] when the text is not a well-formed
/// document with a `<project>` root, and with [`crate::GanError::Validation`]
/// carrying every issue found when the project does not match the format.
/// No partial project is ever returned.
pub fn parse_gan_str_with(xml: &str, config: &ParserConfig) -> GanResult<Project> {
    // the first task past the limit is reported as a validation issue,
    // anything deeper is rejected while building the tree
    let max_element_depth = config.max_task_depth.saturating_add(TASK_NESTING_OFFSET);
    let mut document = parse_document(xml, max_element_depth)?;
    let root = document
        .remove("project")
        .ok_or(XmlError::MissingProjectElement)?;
    tracing::debug!("xml tree built, validating project");

    let element = validate_project(&root, config)?;
    let project = convert_project(element, config)?;
    tracing::info!(
        name = %project.name,
        tasks = project.task_count(),
        resources = project.resource_set.resources.len(),
        "parsed .gan project"
    );
    Ok(project)
}
