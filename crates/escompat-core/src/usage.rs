//! Browser usage shares and coverage queries.
//!
//! A query selects a baseline of environments and removes versions of
//! families at or below a threshold:
//!
//! ```text
//! defaults, not chrome <= 60, not ie <= 11
//! ```
//!
//! Its coverage is the summed usage share, in percent, of what remains.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::database::DatabaseError;
use crate::env::Version;

const BUNDLED_USAGE_TABLE: &str = include_str!("../data/usage-share.json");

/// Baselines that select every entry of the table.
const BASELINES: &[&str] = &["defaults", "all"];

static EXCLUSION_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^not\s+([a-zA-Z]+)\s*<=\s*([0-9]+(?:\.[0-9]+)?)$").expect("Invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("empty coverage query")]
    Empty,
    #[error("unknown query baseline '{0}' (expected one of: defaults, all)")]
    UnknownBaseline(String),
    #[error("malformed query clause '{0}' (expected 'not <browser> <= <version>')")]
    MalformedClause(String),
}

/// Resolves coverage queries to a usage share.
pub trait UsageShareDatabase: Send + Sync {
    fn coverage_of(&self, query: &str) -> Result<f64, QueryError>;
}

#[derive(Debug, Clone, PartialEq)]
struct Exclusion {
    family: String,
    version: Version,
}

#[derive(Debug, Clone, PartialEq)]
struct Query {
    exclusions: Vec<Exclusion>,
}

impl Query {
    fn parse(query: &str) -> Result<Self, QueryError> {
        let mut clauses = query.split(',').map(str::trim);

        let baseline = clauses.next().filter(|b| !b.is_empty()).ok_or(QueryError::Empty)?;
        if !BASELINES.contains(&baseline) {
            return Err(QueryError::UnknownBaseline(baseline.to_string()));
        }

        let exclusions = clauses
            .map(|clause| {
                let captures = EXCLUSION_CLAUSE
                    .captures(clause)
                    .ok_or_else(|| QueryError::MalformedClause(clause.to_string()))?;
                let version = captures[2]
                    .parse()
                    .map_err(|_| QueryError::MalformedClause(clause.to_string()))?;
                Ok(Exclusion {
                    family: captures[1].to_ascii_lowercase(),
                    version,
                })
            })
            .collect::<Result<_, QueryError>>()?;

        Ok(Self { exclusions })
    }

    fn excludes(&self, family: &str, version: Version) -> bool {
        self.exclusions
            .iter()
            .any(|e| e.family == family && version <= e.version)
    }
}

#[derive(Deserialize)]
struct RawUsage {
    #[serde(default)]
    agents: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    agents: BTreeMap<String, Vec<(Version, f64)>>,
}

impl UsageTable {
    pub fn bundled() -> Result<Self, DatabaseError> {
        Self::parse(BUNDLED_USAGE_TABLE, None)
    }

    pub fn from_path(path: &Path) -> Result<Self, DatabaseError> {
        let content = std::fs::read_to_string(path).map_err(|e| DatabaseError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, Some(path))
    }

    pub fn from_json(content: &str) -> Result<Self, DatabaseError> {
        Self::parse(content, None)
    }

    fn parse(content: &str, origin: Option<&Path>) -> Result<Self, DatabaseError> {
        let raw: RawUsage =
            serde_json::from_str(content).map_err(|source| DatabaseError::ParseError {
                origin: origin.map(Path::to_path_buf),
                source,
            })?;

        let mut agents = BTreeMap::new();
        for (family, versions) in raw.agents {
            let mut entries: Vec<(Version, f64)> = versions
                .into_iter()
                .filter_map(|(version, share)| match version.parse::<Version>() {
                    Ok(version) => Some((version, share)),
                    Err(e) => {
                        tracing::warn!(%family, %version, error = %e, "skipping usage entry");
                        None
                    }
                })
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            agents.insert(family.to_ascii_lowercase(), entries);
        }

        Ok(Self { agents })
    }

    /// Summed share of every entry in the table.
    pub fn total(&self) -> f64 {
        self.agents
            .values()
            .flat_map(|versions| versions.iter().map(|(_, share)| share))
            .sum()
    }
}

impl UsageShareDatabase for UsageTable {
    fn coverage_of(&self, query: &str) -> Result<f64, QueryError> {
        let query = Query::parse(query)?;

        Ok(self
            .agents
            .iter()
            .flat_map(|(family, versions)| {
                versions
                    .iter()
                    .filter(|(version, _)| !query.excludes(family, *version))
                    .map(|(_, share)| share)
            })
            .sum())
    }
}
