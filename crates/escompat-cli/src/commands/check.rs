//! Check command - reports syntax the target environments cannot run

use crate::output::Report;
use crate::output::json::JsonFormatter;
use crate::output::pretty::PrettyFormatter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use escompat_core::Aggregator;
use escompat_core::analysis::{AnalysisEngine, load_usage_table};
use escompat_core::config::{Config, PathFilter};
use escompat_core::coverage::{self, CoverageResult};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

const SUPPORTED_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to analyze
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Target environment such as chrome60 (repeatable or comma-separated)
    #[arg(short, long = "env", value_name = "ENV", value_delimiter = ',')]
    pub envs: Vec<String>,

    /// Use this config file instead of searching for escompat.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Skip minimum requirement and usage coverage computation
    #[arg(long)]
    pub no_coverage: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Files found under the requested paths, and the paths that do not exist.
#[derive(Debug, Default)]
struct Discovery {
    files: Vec<PathBuf>,
    missing: Vec<PathBuf>,
}

impl CheckArgs {
    pub fn run(&self) -> Result<ExitCode> {
        self.configure_colors();

        let start = self.paths.first().map(PathBuf::as_path).unwrap_or(Path::new("."));
        let config = super::load_config(start, self.config.as_deref())?;
        let filter = PathFilter::new(&config)?;

        let discovery = discover_all(&self.paths, &filter);
        for path in &discovery.missing {
            tracing::warn!(path = %path.display(), "target path does not exist");
            eprintln!(
                "{} path '{}' does not exist, skipping",
                "warning:".yellow().bold(),
                path.display()
            );
        }

        let engine = AnalysisEngine::from_config(&config, &self.envs)
            .context("Failed to load the compatibility database")?;
        for env in engine.undefined_environments() {
            eprintln!(
                "{} environment '{}' is not defined in the compatibility database, ignoring",
                "warning:".yellow().bold(),
                env
            );
        }

        tracing::info!(
            files = discovery.files.len(),
            targets = engine.targets().len(),
            "checking files"
        );

        let aggregator = analyze_files(&engine, &discovery.files);
        let coverage = if self.no_coverage {
            None
        } else {
            match self.compute_coverage(&config, &engine, &aggregator) {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "coverage skipped");
                    eprintln!(
                        "{} {:#}; coverage is not reported",
                        "warning:".yellow().bold(),
                        e
                    );
                    None
                }
            }
        };

        let report = Report {
            files_checked: discovery.files.len(),
            errors: aggregator.errors(),
            targets: engine.targets(),
            undefined_envs: engine.undefined_environments(),
            coverage: coverage.as_ref(),
        };

        match self.format {
            OutputFormat::Json => println!("{}", JsonFormatter.format(&report)),
            OutputFormat::Pretty => {
                let formatter = PrettyFormatter::with_sources(read_sources(&aggregator));
                print!("{}", formatter.format(&report));
            }
        }

        if aggregator.is_clean() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }

    fn compute_coverage(
        &self,
        config: &Config,
        engine: &AnalysisEngine,
        aggregator: &Aggregator,
    ) -> Result<CoverageResult> {
        let usage = load_usage_table(&config.database)
            .context("Failed to load the usage share database")?;
        let result = coverage::compute(
            engine.targets(),
            aggregator.incompatible_environments(),
            config.database.baseline(),
            &usage,
        )
        .context("Invalid coverage query")?;
        Ok(result)
    }

    fn configure_colors(&self) {
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        if self.no_color || no_color_env {
            colored::control::set_override(false);
        }
    }
}

/// Runs every file through the engine on the rayon pool. Each worker folds
/// into its own aggregator; the partial results are merged at the end.
fn analyze_files(engine: &AnalysisEngine, files: &[PathBuf]) -> Aggregator {
    files
        .par_iter()
        .fold(Aggregator::new, |mut aggregator, file| {
            tracing::debug!(file = %file.display(), "analyzing");
            aggregator.add_file(file.to_string_lossy(), engine.analyze_path(file));
            aggregator
        })
        .reduce(Aggregator::new, Aggregator::merge)
}

fn read_sources(aggregator: &Aggregator) -> HashMap<String, String> {
    aggregator
        .errors()
        .keys()
        .filter_map(|path| {
            let content = fs::read_to_string(path).ok()?;
            Some((path.clone(), content))
        })
        .collect()
}

fn discover_all(paths: &[PathBuf], filter: &PathFilter) -> Discovery {
    let mut discovery = Discovery::default();

    for path in paths {
        if !path.exists() {
            discovery.missing.push(path.clone());
            continue;
        }
        discovery.files.extend(discover_files(path, filter));
    }

    discovery.files.sort();
    discovery.files.dedup();
    discovery
}

fn discover_files(path: &Path, filter: &PathFilter) -> Vec<PathBuf> {
    if path.is_file() {
        if is_supported_file(path) {
            return vec![path.to_path_buf()];
        } else {
            return vec![];
        }
    }

    WalkDir::new(path)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_supported_file(e.path()))
        .filter(|e| filter.accepts(e.path().strip_prefix(path).unwrap_or(e.path())))
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name == "node_modules")
        .unwrap_or(false)
}
