//! Init command - writes a default escompat.toml

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use escompat_core::config::CONFIG_FILENAME;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# escompat configuration file

# Glob patterns of files to check (everything when empty)
# include = ["src/**/*.js"]

# Glob patterns of files to skip
# exclude = ["dist/**", "**/*.min.js"]

# Target environments; every environment of the database when empty
envs = ["chrome60", "firefox60", "safari11", "edge16"]

[features]
# Feature ids, family names or editions to ignore
# disabled = ["templateLiterals", "es2022"]
disabled = []

[database]
# Replace the bundled support and usage tables
# compat = "compat-table.json"
# usage = "usage-share.json"

# Coverage query baseline: "defaults" or "all"
baseline = "defaults"
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(&self) -> Result<()> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Config file '{}' already exists. Use --force to overwrite.",
                CONFIG_FILENAME
            );
        }

        fs::write(config_path, DEFAULT_CONFIG)?;
        println!(
            "{} Created {} configuration file",
            "✓".green().bold(),
            CONFIG_FILENAME.cyan()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escompat_core::config::load_config_with_warnings;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn init_creates_config_file() {
        let dir = tempdir().unwrap();
        env::set_current_dir(dir.path()).unwrap();

        let result = InitArgs { force: false }.run();

        assert!(result.is_ok());
        assert!(dir.path().join(CONFIG_FILENAME).exists());
    }

    #[test]
    #[serial]
    fn init_fails_if_config_exists_without_force() {
        let dir = tempdir().unwrap();
        env::set_current_dir(dir.path()).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "existing").unwrap();

        let result = InitArgs { force: false }.run();

        assert!(result.is_err());
        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(content, "existing");
    }

    #[test]
    #[serial]
    fn init_with_force_overwrites_existing() {
        let dir = tempdir().unwrap();
        env::set_current_dir(dir.path()).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "existing").unwrap();

        let result = InitArgs { force: true }.run();

        assert!(result.is_ok());
        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("[database]"));
    }

    #[test]
    fn default_config_is_valid_toml() {
        let config: Result<toml::Table, _> = DEFAULT_CONFIG.parse();
        assert!(config.is_ok());
    }

    #[test]
    fn default_config_loads_without_warnings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, DEFAULT_CONFIG).unwrap();

        let result = load_config_with_warnings(&path).unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(result.config.envs.len(), 4);
        assert_eq!(result.config.database.baseline(), "defaults");
    }
}
