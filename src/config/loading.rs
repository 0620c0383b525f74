//! Configuration loading functionality.
//!
//! Locates `service-agent.toml`, parses it and validates the result. A missing
//! file is not an error: the agent runs on defaults.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use super::validation::validate_config;
use crate::common::constants::*;

/// Get the configuration file path.
///
/// Uses `custom_dir` when given, otherwise the XDG config directory.
pub fn get_config_path(custom_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = custom_dir {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }

    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Returns the default configuration if no file exists.
pub fn load(custom_dir: Option<&Path>) -> Result<Config> {
    let config_path = get_config_path(custom_dir)?;

    if !config_path.exists() {
        log_debug!(
            "No configuration file at {}, using defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    load_from_path(&config_path)
}

/// Load configuration from a specific path.
///
/// Unlike [`load`], the file must exist.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse configuration in {}", path.display()))?;

    validate_config(&config)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    log_debug!("Loaded configuration from {}", path.display());

    Ok(config)
}
