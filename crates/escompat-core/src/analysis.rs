//! Analysis engine
//!
//! Ties the detector registry, the support database and the requested
//! targets together, and turns files into error records.

use std::path::Path;

use crate::config::{Config, DatabaseConfig};
use crate::database::{CompatTable, DatabaseError, SupportDatabase};
use crate::env::{EnvironmentId, TargetSelection};
use crate::features::FeatureRegistry;
use crate::parser::ParsedFile;
use crate::records::{ErrorKey, ErrorRecord, FileErrors};
use crate::resolver::resolve;
use crate::usage::UsageTable;
use crate::visitor::detect_features;

pub struct AnalysisEngine {
    registry: FeatureRegistry,
    database: Box<dyn SupportDatabase>,
    selection: TargetSelection,
}

impl AnalysisEngine {
    /// Targets every environment of `database` when `requested` is empty.
    pub fn new<S: AsRef<str>>(
        registry: FeatureRegistry,
        database: Box<dyn SupportDatabase>,
        requested: &[S],
    ) -> Self {
        let selection = if requested.is_empty() {
            TargetSelection {
                targets: database.environments(),
                undefined: Vec::new(),
            }
        } else {
            TargetSelection::resolve(requested, |env| database.knows_environment(env))
        };

        Self {
            registry,
            database,
            selection,
        }
    }

    /// Builds an engine from configuration. `envs` replaces the configured
    /// environments when non-empty.
    pub fn from_config(config: &Config, envs: &[String]) -> Result<Self, DatabaseError> {
        let mut registry = FeatureRegistry::with_defaults();
        registry.configure(&config.features);

        let database = load_compat_table(&config.database)?;
        let requested: &[String] = if envs.is_empty() { &config.envs } else { envs };

        Ok(Self::new(registry, Box::new(database), requested))
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    pub fn database(&self) -> &dyn SupportDatabase {
        self.database.as_ref()
    }

    pub fn targets(&self) -> &[EnvironmentId] {
        &self.selection.targets
    }

    /// Requested identifiers that were dropped as unknown or malformed.
    pub fn undefined_environments(&self) -> &[String] {
        &self.selection.undefined
    }

    pub fn analyze(&self, file: &ParsedFile) -> FileErrors {
        let outcome = detect_features(file, &self.registry);
        resolve(outcome, self.database.as_ref(), &self.selection.targets)
    }

    pub fn analyze_source(&self, filename: &str, source: &str) -> FileErrors {
        self.analyze(&ParsedFile::from_source(filename, source))
    }

    /// Reads and analyzes `path`. An unreadable file is reported as a parse
    /// error for that file.
    pub fn analyze_path(&self, path: &Path) -> FileErrors {
        match std::fs::read_to_string(path) {
            Ok(source) => self.analyze_source(&path.to_string_lossy(), &source),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read file");
                let mut errors = FileErrors::new();
                errors.insert(
                    ErrorKey::Parse,
                    ErrorRecord::Parse {
                        message: format!("failed to read file: {e}"),
                    },
                );
                errors
            }
        }
    }
}

pub fn load_compat_table(config: &DatabaseConfig) -> Result<CompatTable, DatabaseError> {
    match &config.compat {
        Some(path) => CompatTable::from_path(path),
        None => CompatTable::bundled(),
    }
}

pub fn load_usage_table(config: &DatabaseConfig) -> Result<UsageTable, DatabaseError> {
    match &config.usage {
        Some(path) => UsageTable::from_path(path),
        None => UsageTable::bundled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeaturesConfig;
    use crate::features::FeatureId;

    const TABLE: &str = r#"{
        "environments": ["chrome40", "chrome60", "ie11"],
        "features": {
            "arrowFunctions": { "incompatible": ["chrome40", "ie11"] },
            "let": { "incompatible": ["chrome40"], "partial": ["ie11"] },
            "const": { "partial": ["ie11"] }
        }
    }"#;

    fn engine(requested: &[&str]) -> AnalysisEngine {
        AnalysisEngine::new(
            FeatureRegistry::with_defaults(),
            Box::new(CompatTable::from_json(TABLE).unwrap()),
            requested,
        )
    }

    fn key(id: &str) -> ErrorKey {
        ErrorKey::Feature(FeatureId::new(id))
    }

    #[test]
    fn reports_incompatible_features() {
        let errors = engine(&["ie11"]).analyze_source("test.js", "var f = () => 1;");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&key("arrowFunctions")].incompat_envs().len(), 1);
    }

    #[test]
    fn supported_features_produce_nothing() {
        let errors = engine(&["chrome60"]).analyze_source("test.js", "let f = () => 1;");

        assert!(errors.is_empty());
    }

    #[test]
    fn unknown_features_are_undefined() {
        let errors = engine(&["chrome60"]).analyze_source("test.js", "var a = 10n;");

        assert!(matches!(
            errors[&key("bigint")],
            ErrorRecord::FeatureUndefined { .. }
        ));
    }

    #[test]
    fn syntax_errors_become_parse_records() {
        let errors = engine(&["ie11"]).analyze_source("test.js", "let f = () => {;");

        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&ErrorKey::Parse));
    }

    #[test]
    fn unknown_environments_are_dropped() {
        let engine = engine(&["ie11", "netscape4", "chrome"]);

        assert_eq!(engine.targets(), &["ie11".parse::<EnvironmentId>().unwrap()]);
        assert_eq!(engine.undefined_environments(), &["netscape4", "chrome"]);
    }

    #[test]
    fn no_request_targets_every_environment() {
        let engine = engine(&[]);

        assert_eq!(engine.targets().len(), 3);
        assert!(engine.undefined_environments().is_empty());
    }

    #[test]
    fn from_config_applies_disabled_features_and_envs() {
        let dir = tempfile::tempdir().unwrap();
        let compat = dir.path().join("compat.json");
        std::fs::write(&compat, TABLE).unwrap();
        let config = Config {
            envs: vec!["chrome40".to_string()],
            features: FeaturesConfig {
                disabled: vec!["arrowFunctions".to_string()],
            },
            database: DatabaseConfig {
                compat: Some(compat),
                ..DatabaseConfig::default()
            },
            ..Config::default()
        };

        let engine = AnalysisEngine::from_config(&config, &[]).unwrap();
        let errors = engine.analyze_source("test.js", "let f = () => 1;");

        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&key("let")));
    }

    #[test]
    fn cli_envs_replace_configured_envs() {
        let config = Config {
            envs: vec!["chrome60".to_string()],
            ..Config::default()
        };

        let engine = AnalysisEngine::from_config(&config, &["ie11".to_string()]).unwrap();

        assert_eq!(engine.targets(), &["ie11".parse::<EnvironmentId>().unwrap()]);
    }

    #[test]
    fn unreadable_file_is_a_parse_record() {
        let dir = tempfile::tempdir().unwrap();

        let errors = engine(&["ie11"]).analyze_path(&dir.path().join("missing.js"));

        assert!(matches!(
            &errors[&ErrorKey::Parse],
            ErrorRecord::Parse { message } if message.starts_with("failed to read file")
        ));
    }

    #[test]
    fn missing_database_file_is_an_error() {
        let config = DatabaseConfig {
            compat: Some("/definitely/not/here.json".into()),
            ..DatabaseConfig::default()
        };

        assert!(load_compat_table(&config).is_err());
    }
}
