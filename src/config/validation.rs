//! Configuration validation functionality.

use anyhow::Result;

use super::Config;
use crate::args::is_valid_service_path;
use crate::common::constants::*;

/// Reject values the agent could only fail on later, after connecting to the bus.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(path) = config.path.as_deref()
        && !is_valid_service_path(path)
    {
        anyhow::bail!("path ({path}) must start with '/'");
    }

    if let Some(name) = config.name.as_deref()
        && name.trim().is_empty()
    {
        anyhow::bail!("name must not be empty");
    }

    if let Some(description) = config.description.as_deref()
        && description.trim().is_empty()
    {
        anyhow::bail!("description must not be empty");
    }

    if let Some(interval_ms) = config.dispatch_interval_ms
        && !(MINIMUM_DISPATCH_INTERVAL_MS..=MAXIMUM_DISPATCH_INTERVAL_MS).contains(&interval_ms)
    {
        anyhow::bail!(
            "dispatch_interval_ms ({} ms) must be between {} and {} milliseconds",
            interval_ms,
            MINIMUM_DISPATCH_INTERVAL_MS,
            MAXIMUM_DISPATCH_INTERVAL_MS
        );
    }

    Ok(())
}
