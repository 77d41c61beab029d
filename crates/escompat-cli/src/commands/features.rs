//! Features command - lists detected syntax features by edition and family

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use escompat_core::FeatureRegistry;
use std::env;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Only list features left enabled by the configuration
    #[arg(long)]
    pub enabled: bool,

    /// Use this config file instead of searching for escompat.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl FeaturesArgs {
    pub fn run(&self) -> Result<()> {
        let cwd = env::current_dir()?;
        let config = super::load_config(&cwd, self.config.as_deref())?;

        let mut registry = FeatureRegistry::with_defaults();
        registry.configure(&config.features);

        print!("{}", render_tree(&registry, self.enabled));
        Ok(())
    }
}

fn render_tree(registry: &FeatureRegistry, enabled_only: bool) -> String {
    let mut lines = Vec::new();

    for edition in registry.tree(enabled_only) {
        lines.push(edition.edition.as_str().to_uppercase().bold().to_string());
        for family in &edition.families {
            lines.push(format!("  {}", family.name.cyan()));
            for feature in &family.features {
                let status = if enabled_only || registry.is_enabled(feature.id) {
                    String::new()
                } else {
                    format!(" {}", "(disabled)".dimmed())
                };
                lines.push(format!(
                    "    {:<28} {}{}",
                    feature.id, feature.description, status
                ));
            }
        }
    }

    let shown: usize = registry
        .tree(enabled_only)
        .iter()
        .flat_map(|e| &e.families)
        .map(|f| f.features.len())
        .sum();
    lines.push(String::new());
    lines.push(format!("{} features", shown));

    lines.join("\n") + "\n"
}
