//! Print or initialize the configuration file.

use std::path::Path;

use anyhow::Context;
use gerbil_common::config::AppConfig;

pub fn run(
    config: &AppConfig,
    config_path: &Path,
    write_defaults: bool,
    force: bool,
) -> anyhow::Result<()> {
    if write_defaults {
        if config_path.exists() && !force {
            anyhow::bail!(
                "{} already exists; pass --force to overwrite",
                config_path.display()
            );
        }
        AppConfig::default()
            .save_to(config_path)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    println!("# {}", config_path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
