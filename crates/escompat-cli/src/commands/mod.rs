//! CLI command implementations

pub mod check;
pub mod envs;
pub mod features;
pub mod init;

pub use check::CheckArgs;
pub use envs::EnvsArgs;
pub use features::FeaturesArgs;
pub use init::InitArgs;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use escompat_core::config::{Config, load_config_or_default_with_warnings, load_config_with_warnings};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check JavaScript/TypeScript files against target environments
    Check(CheckArgs),

    /// List the syntax features escompat detects
    Features(FeaturesArgs),

    /// List the environments known to the compatibility database
    Envs(EnvsArgs),

    /// Create an escompat.toml in the current directory
    Init(InitArgs),
}

/// Loads `explicit`, or the nearest `escompat.toml` above `start`, printing
/// unknown-option warnings to stderr.
pub(crate) fn load_config(start: &Path, explicit: Option<&Path>) -> Result<Config> {
    let result = match explicit {
        Some(path) => load_config_with_warnings(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => load_config_or_default_with_warnings(start)?,
    };

    for warning in &result.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    Ok(result.config)
}
