//! Configuration loading and parsing for escompat
//!
//! Provides functionality to load and parse `escompat.toml` configuration files.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::Pattern;

pub const CONFIG_FILENAME: &str = "escompat.toml";

pub const DEFAULT_BASELINE: &str = "defaults";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["include", "exclude", "envs", "features", "database"];
const KNOWN_FEATURES_KEYS: &[&str] = &["disabled"];
const KNOWN_DATABASE_KEYS: &[&str] = &["compat", "usage", "baseline"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub envs: Vec<String>,
    pub features: FeaturesConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Feature ids, family names or editions to skip.
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub compat: Option<PathBuf>,
    pub usage: Option<PathBuf>,
    pub baseline: Option<String>,
}

impl DatabaseConfig {
    pub fn baseline(&self) -> &str {
        self.baseline.as_deref().unwrap_or(DEFAULT_BASELINE)
    }
}

impl Config {
    /// Resolves database paths relative to the directory holding the config file.
    pub fn resolve_paths(&mut self, config_dir: &Path) {
        for path in [&mut self.database.compat, &mut self.database.usage]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = config_dir.join(&*path);
            }
        }
    }
}

/// Compiled include and exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PathFilter {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            include: compile_patterns(&config.include)?,
            exclude: compile_patterns(&config.exclude)?,
        })
    }

    /// Whether `path`, relative to the analyzed root, should be checked.
    pub fn accepts(&self, path: &Path) -> bool {
        if self.exclude.iter().any(|p| p.matches_path(path)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| p.matches_path(path))
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_warnings(path).map(|result| result.config)
}

pub fn load_config_with_warnings(path: &Path) -> Result<ConfigResult, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    if let Some(dir) = path.parent() {
        config.resolve_paths(dir);
    }

    let warnings = detect_unknown_keys(&content);
    for warning in &warnings {
        tracing::debug!(config = %path.display(), "{warning}");
    }

    Ok(ConfigResult { config, warnings })
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    for (section, known) in [
        ("features", KNOWN_FEATURES_KEYS),
        ("database", KNOWN_DATABASE_KEYS),
    ] {
        if let Some(toml::Value::Table(entries)) = table.get(section) {
            for key in entries.keys() {
                if !known.contains(&key.as_str()) {
                    warnings.push(format!("Unknown config option in [{}]: '{}'", section, key));
                }
            }
        }
    }

    warnings
}

pub fn load_config_or_default_with_warnings(start_dir: &Path) -> Result<ConfigResult, ConfigError> {
    match find_config_file(start_dir) {
        Some(path) => load_config_with_warnings(&path),
        None => Ok(ConfigResult::default()),
    }
}
