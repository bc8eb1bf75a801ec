use std::path::PathBuf;

use anyhow::{bail, Context};
use rollshift_core::config::save_config;
use rollshift_core::PipelineConfig;

/// Default location written by `init` without a path.
fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join("rollshift").join("pipeline.yml"))
}

/// Write the default pipeline configuration as YAML.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn cmd_init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };

    if path.exists() && !force {
        bail!(
            "{} already exists, use --force to overwrite",
            path.display()
        );
    }

    save_config(&path, &PipelineConfig::default())?;
    println!("Wrote default pipeline config to {}", path.display());
    Ok(())
}
