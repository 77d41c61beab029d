//! Feature support database.
//!
//! Maps each feature id to the environments that lack support for it, either
//! entirely or partially. An environment listed under neither is compatible.
//! The bundled table can be replaced with a JSON file of the same shape:
//!
//! ```json
//! {
//!   "environments": ["chrome60", "ie11"],
//!   "features": {
//!     "arrowFunctions": { "incompatible": ["ie11"], "partial": [] }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::env::EnvironmentId;
use crate::features::FeatureId;

const BUNDLED_COMPAT_TABLE: &str = include_str!("../data/compat-table.json");

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Failed to read database '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid database JSON{}: {source}", origin_suffix(.origin))]
    ParseError {
        origin: Option<PathBuf>,
        source: serde_json::Error,
    },
}

fn origin_suffix(origin: &Option<PathBuf>) -> String {
    origin
        .as_ref()
        .map(|p| format!(" in '{}'", p.display()))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSupport {
    pub incompatible: BTreeSet<EnvironmentId>,
    pub partial: BTreeSet<EnvironmentId>,
}

impl FeatureSupport {
    pub fn is_incompatible(&self, env: &EnvironmentId) -> bool {
        self.incompatible.contains(env)
    }

    pub fn is_partial(&self, env: &EnvironmentId) -> bool {
        self.partial.contains(env)
    }
}

/// Answers which environments support which features.
pub trait SupportDatabase: Send + Sync {
    fn support_of(&self, feature: &FeatureId) -> Option<&FeatureSupport>;

    fn knows_environment(&self, env: &EnvironmentId) -> bool;

    /// Every environment the database describes, sorted.
    fn environments(&self) -> Vec<EnvironmentId>;
}

#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    environments: Vec<String>,
    #[serde(default)]
    features: BTreeMap<String, RawSupport>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSupport {
    incompatible: Vec<String>,
    partial: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CompatTable {
    environments: BTreeSet<EnvironmentId>,
    features: HashMap<FeatureId, FeatureSupport>,
}

impl CompatTable {
    /// The table shipped with escompat.
    pub fn bundled() -> Result<Self, DatabaseError> {
        Self::parse(BUNDLED_COMPAT_TABLE, None)
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
        let raw: RawTable =
            serde_json::from_str(content).map_err(|source| DatabaseError::ParseError {
                origin: origin.map(Path::to_path_buf),
                source,
            })?;

        let mut environments: BTreeSet<EnvironmentId> =
            raw.environments.iter().filter_map(|s| parse_env(s)).collect();

        let mut features = HashMap::with_capacity(raw.features.len());
        for (id, support) in raw.features {
            let support = FeatureSupport {
                incompatible: support.incompatible.iter().filter_map(|s| parse_env(s)).collect(),
                partial: support.partial.iter().filter_map(|s| parse_env(s)).collect(),
            };
            environments.extend(support.incompatible.iter().cloned());
            environments.extend(support.partial.iter().cloned());
            features.insert(FeatureId::new(id), support);
        }

        tracing::debug!(
            environments = environments.len(),
            features = features.len(),
            "loaded compatibility table"
        );

        Ok(Self {
            environments,
            features,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

fn parse_env(raw: &str) -> Option<EnvironmentId> {
    match raw.parse() {
        Ok(env) => Some(env),
        Err(e) => {
            tracing::warn!(environment = raw, error = %e, "skipping database entry");
            None
        }
    }
}

impl SupportDatabase for CompatTable {
    fn support_of(&self, feature: &FeatureId) -> Option<&FeatureSupport> {
        self.features.get(feature)
    }

    fn knows_environment(&self, env: &EnvironmentId) -> bool {
        self.environments.contains(env)
    }

    fn environments(&self) -> Vec<EnvironmentId> {
        self.environments.iter().cloned().collect()
    }
}
