//! Minimum requirements and usage coverage for a set of targets.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::env::{EnvironmentId, Version};
use crate::usage::{QueryError, UsageShareDatabase};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageResult {
    /// Oldest compatible version requested, per browser family.
    pub minimum_requirements: BTreeMap<String, Version>,
    pub coverage_percentage: f64,
    pub query: String,
}

/// Highest incompatible version per family.
pub fn maximum_incompatible<'a>(
    incompatible: impl IntoIterator<Item = &'a EnvironmentId>,
) -> BTreeMap<String, Version> {
    let mut maxima: BTreeMap<String, Version> = BTreeMap::new();
    for env in incompatible {
        maxima
            .entry(env.family().to_string())
            .and_modify(|v| *v = (*v).max(env.version()))
            .or_insert(env.version());
    }
    maxima
}

/// Builds `"{baseline}, not {family} <= {version}, ..."` with families sorted.
pub fn exclusion_query(baseline: &str, maxima: &BTreeMap<String, Version>) -> String {
    let mut query = baseline.to_string();
    for (family, version) in maxima {
        query.push_str(&format!(", not {family} <= {version}"));
    }
    query
}

/// Lowest requested version per family among environments not found incompatible.
pub fn minimum_requirements(
    requested: &[EnvironmentId],
    incompatible: &BTreeSet<EnvironmentId>,
) -> BTreeMap<String, Version> {
    let mut minima: BTreeMap<String, Version> = BTreeMap::new();
    for env in requested.iter().filter(|env| !incompatible.contains(*env)) {
        minima
            .entry(env.family().to_string())
            .and_modify(|v| *v = (*v).min(env.version()))
            .or_insert(env.version());
    }
    minima
}

pub fn compute(
    requested: &[EnvironmentId],
    incompatible: &BTreeSet<EnvironmentId>,
    baseline: &str,
    usage: &dyn UsageShareDatabase,
) -> Result<CoverageResult, QueryError> {
    let query = exclusion_query(baseline, &maximum_incompatible(incompatible));
    let coverage_percentage = usage.coverage_of(&query)?;
    tracing::debug!(%query, coverage_percentage, "resolved coverage");

    Ok(CoverageResult {
        minimum_requirements: minimum_requirements(requested, incompatible),
        coverage_percentage,
        query,
    })
}
