//! Data directory layout and config file creation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{Config, HomeHostsPaths, CONFIG_TEMPLATE};

/// Ensure the homehosts directory exists.
pub fn ensure_dirs(paths: &HomeHostsPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.config_dir)
        .with_context(|| format!("create {}", paths.config_dir.display()))?;
    Ok(())
}

/// Write the template config unless one exists. Returns whether it was created.
pub fn init_config(config_file: &Path) -> Result<bool> {
    if config_file.exists() {
        return Ok(false);
    }
    if let Some(p) = config_file.parent() {
        std::fs::create_dir_all(p)?;
    }
    std::fs::write(config_file, CONFIG_TEMPLATE)
        .with_context(|| format!("write {}", config_file.display()))?;
    Ok(true)
}

/// Load config from store.
pub fn load_config(config_file: &Path) -> Result<Config> {
    Ok(Config::load(config_file)?)
}
