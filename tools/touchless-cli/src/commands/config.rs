//! Show or initialize the configuration file.

use std::path::Path;

use touchless_common::config::AppConfig;

pub fn run(config: &AppConfig, path: &Path, init: bool, force: bool) -> anyhow::Result<()> {
    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists; pass --force to overwrite",
                path.display()
            );
        }
        AppConfig::default().save_to(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
