use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The input is not a well-formed XML document with a `<project>` root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("document has no top-level <project> element")]
    MissingProjectElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    Missing,
    InvalidType,
    InvalidNumber,
    InvalidBoolean,
    InvalidEnum,
    InvalidDate,
    TooDeep,
}

/// One field that failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Location of the offending element or attribute, e.g. `project.tasks.task[0].@duration`.
    pub path: String,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every issue found while validating a document. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({} issue(s), first: {})", .issues.len(), first_issue(.issues))]
pub struct ValidationError {
    pub message: String,
    pub issues: Vec<ValidationIssue>,
}

fn first_issue(issues: &[ValidationIssue]) -> String {
    issues.first().map(ToString::to_string).unwrap_or_default()
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<ValidationIssue>) -> Self {
        Self {
            message: ".gan file could not be parsed".to_string(),
            issues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("no workday found after {start} within {searched_days} consecutive days")]
    NoWorkdayFound { start: NaiveDate, searched_days: u32 },

    #[error("advancing workdays from {start} runs past the last representable date")]
    DateOutOfRange { start: NaiveDate },
}

#[derive(Debug, Error)]
pub enum GanError {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("end date computation failed: {0}")]
    Calendar(#[from] CalendarError),
}

impl GanError {
    /// True for malformed XML or a missing `<project>` root.
    pub fn is_structural(&self) -> bool {
        matches!(self, GanError::Xml(_))
    }

    /// The validation issues, if this is a schema validation failure.
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            GanError::Validation(err) => Some(&err.issues),
            _ => None,
        }
    }
}

pub type GanResult<T> = Result<T, GanError>;
