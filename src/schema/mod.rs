//! Schema validation of the raw XML tree.
//!
//! Validation walks the whole document and records every problem it finds
//! before failing, so a broken file is reported in one pass.

pub mod elements;
pub(crate) mod fields;
mod project;

use crate::config::ParserConfig;
use crate::error::{IssueKind, ValidationError};
use elements::ProjectElement;
use fields::{Element, Issues};
use serde_json::Value;

/// Validate the tree found under the `<project>` root element.
pub fn validate_project(
    root: &Value,
    config: &ParserConfig,
) -> Result<ProjectElement, ValidationError> {
    let mut issues = Issues::default();
    let project = Element::from_value(root, "project".to_string(), &mut issues)
        .and_then(|el| project::project(el, &mut issues, config));

    match project {
        Some(project) if issues.is_empty() => Ok(project),
        _ => {
            if issues.is_empty() {
                issues.push("project", IssueKind::InvalidType, "document is not a project");
            }
            tracing::debug!("schema validation failed");
            Err(ValidationError::new(issues.into_vec()))
        }
    }
}
