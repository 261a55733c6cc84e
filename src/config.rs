use crate::calendar::DEFAULT_MAX_NON_WORKING_RUN;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TASK_DEPTH: usize = 256;
/// About a century of workdays.
pub const DEFAULT_MAX_TASK_DURATION: i64 = 36_500;

/// Limits applied while parsing a `.gan` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Deepest `<task>` nesting accepted; deeper documents fail validation.
    pub max_task_depth: usize,
    /// Consecutive non-working days after which end date computation fails.
    pub max_non_working_run: u32,
    /// Longest task or baseline task duration in days; longer ones fail validation.
    pub max_task_duration: i64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_task_depth: DEFAULT_MAX_TASK_DEPTH,
            max_non_working_run: DEFAULT_MAX_NON_WORKING_RUN,
            max_task_duration: DEFAULT_MAX_TASK_DURATION,
        }
    }
}

impl ParserConfig {
    pub fn with_max_task_depth(mut self, depth: usize) -> Self {
        self.max_task_depth = depth;
        self
    }

    pub fn with_max_non_working_run(mut self, days: u32) -> Self {
        self.max_non_working_run = days;
        self
    }

    pub fn with_max_task_duration(mut self, days: i64) -> Self {
        self.max_task_duration = days;
        self
    }
}
