//! Envs command - lists the environments of the compatibility database

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use escompat_core::analysis::load_compat_table;
use escompat_core::{EnvironmentId, SupportDatabase};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EnvsArgs {
    /// Use this config file instead of searching for escompat.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl EnvsArgs {
    pub fn run(&self) -> Result<()> {
        let cwd = env::current_dir()?;
        let config = super::load_config(&cwd, self.config.as_deref())?;
        let database = load_compat_table(&config.database)
            .context("Failed to load the compatibility database")?;

        print!("{}", render_environments(&database.environments()));
        Ok(())
    }
}

fn render_environments(environments: &[EnvironmentId]) -> String {
    let mut families: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for env in environments {
        families
            .entry(env.family())
            .or_default()
            .push(env.version().to_string());
    }

    let width = families.keys().map(|f| f.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (family, versions) in &families {
        output.push_str(&format!(
            "{}  {}\n",
            format!("{:<width$}", family, width = width).cyan(),
            versions.join(", ")
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use escompat_core::CompatTable;
    use serial_test::serial;

    fn env(s: &str) -> EnvironmentId {
        s.parse().unwrap()
    }

    #[test]
    #[serial]
    fn groups_versions_by_family() {
        colored::control::set_override(false);
        let environments = vec![env("chrome40"), env("chrome60"), env("ie11"), env("safari10.1")];

        let output = render_environments(&environments);

        colored::control::unset_override();
        assert_eq!(output, "chrome  40, 60\nie      11\nsafari  10.1\n");
    }

    #[test]
    fn empty_database_renders_nothing() {
        assert_eq!(render_environments(&[]), "");
    }

    #[test]
    #[serial]
    fn bundled_database_lists_major_browsers() {
        colored::control::set_override(false);
        let table = CompatTable::bundled().unwrap();

        let output = render_environments(&table.environments());

        colored::control::unset_override();
        for family in ["chrome", "edge", "firefox", "ie", "safari"] {
            assert!(output.lines().any(|l| l.starts_with(family)), "{family} missing");
        }
    }
}
