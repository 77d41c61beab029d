//! Report formatters

pub mod json;
pub mod pretty;

use escompat_core::coverage::CoverageResult;
use escompat_core::{EnvironmentId, GlobalErrorMap};

/// Everything a formatter needs to describe one `check` run.
pub struct Report<'a> {
    pub files_checked: usize,
    pub errors: &'a GlobalErrorMap,
    pub targets: &'a [EnvironmentId],
    pub undefined_envs: &'a [String],
    pub coverage: Option<&'a CoverageResult>,
}

impl Report<'_> {
    pub fn error_count(&self) -> usize {
        self.errors.values().map(|errors| errors.len()).sum()
    }

    pub fn files_with_errors(&self) -> usize {
        self.errors.len()
    }
}

pub(crate) fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
