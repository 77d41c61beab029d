//! Run-wide accumulation of per-file error records.

use std::collections::{BTreeMap, BTreeSet};

use crate::env::EnvironmentId;
use crate::records::FileErrors;

/// File path to that file's error records.
pub type GlobalErrorMap = BTreeMap<String, FileErrors>;

/// Accumulates file results. Partial aggregators built on different threads
/// combine with [`Aggregator::merge`] in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregator {
    errors: GlobalErrorMap,
    incompatible: BTreeSet<EnvironmentId>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `errors` for `path`. Files without errors leave no entry.
    pub fn add_file(&mut self, path: impl Into<String>, errors: FileErrors) {
        if errors.is_empty() {
            return;
        }

        for record in errors.values() {
            self.incompatible.extend(record.incompat_envs().iter().cloned());
        }
        self.errors.entry(path.into()).or_default().extend(errors);
    }

    /// Combines two aggregators. Records of a path present on both sides are
    /// unioned by key; when both carry the same key for the same path the
    /// record of `other` wins, so the result is order independent only while
    /// each file is analysed once or both sides agree on its records.
    pub fn merge(mut self, other: Aggregator) -> Self {
        for (path, errors) in other.errors {
            self.errors.entry(path).or_default().extend(errors);
        }
        self.incompatible.extend(other.incompatible);
        self
    }

    pub fn errors(&self) -> &GlobalErrorMap {
        &self.errors
    }

    /// Every environment some file was incompatible with.
    pub fn incompatible_environments(&self) -> &BTreeSet<EnvironmentId> {
        &self.incompatible
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(|errors| errors.len()).sum()
    }

    pub fn into_parts(self) -> (GlobalErrorMap, BTreeSet<EnvironmentId>) {
        (self.errors, self.incompatible)
    }
}
