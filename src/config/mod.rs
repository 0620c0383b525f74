//! Configuration system for the service agent.
//!
//! Every setting has a built-in default, so the configuration file is optional.
//! When present it supplies defaults that command-line options override.
//!
//! ## Configuration Sources
//!
//! The configuration system looks for `service-agent.toml` in:
//! 1. The directory given with `--config <dir>`
//! 2. **XDG_CONFIG_HOME**/service-agent/service-agent.toml
//!
//! ## Configuration Structure
//!
//! ```toml
//! name = "Example service"                     # Name announced to the service manager
//! description = "Service agent with an example"
//! path = "/org/bluez/service_agent"            # Object path (default: /org/bluez/service_agent_<pid>)
//! bus = "system"                               # "system" or "session"
//! dispatch_interval_ms = 500                   # Dispatch loop wait (10-60000)
//! ```

pub mod loading;
pub mod validation;


use serde::Deserialize;
use std::time::Duration;

use crate::agent::ServiceIdentity;
use crate::args::default_service_path;
use crate::common::constants::*;

// Re-export public API
pub use loading::{get_config_path, load, load_from_path};
pub use validation::validate_config;

/// Message bus the agent connects to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// The system bus, where the service manager lives.
    #[default]
    System,
    /// The per-user session bus. Useful when running a test daemon.
    Session,
}

impl BusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusKind::System => "system",
            BusKind::Session => "session",
        }
    }
}

/// Contents of `service-agent.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub name: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
    pub bus: Option<BusKind>,
    pub dispatch_interval_ms: Option<u64>,
}

/// Values the command line supplied; each one overrides the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
}

impl Config {
    /// Resolve the service identity: command line, then file, then defaults.
    ///
    /// `pid` is only used when neither source names a path.
    pub fn resolve_identity(&self, overrides: CliOverrides, pid: u32) -> ServiceIdentity {
        ServiceIdentity {
            name: overrides
                .name
                .or_else(|| self.name.clone())
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            description: overrides
                .description
                .or_else(|| self.description.clone())
                .unwrap_or_else(|| DEFAULT_SERVICE_DESCRIPTION.to_string()),
            path: overrides
                .path
                .or_else(|| self.path.clone())
                .unwrap_or_else(|| default_service_path(pid)),
        }
    }

    pub fn bus(&self) -> BusKind {
        self.bus.unwrap_or_default()
    }

    pub fn dispatch_interval(&self) -> Duration {
        self.dispatch_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DISPATCH_INTERVAL)
    }

    /// Print the effective settings in debug mode.
    pub fn log_config(&self, identity: &ServiceIdentity) {
        log_block_start!("Service settings");
        log_indented!("Name: {}", identity.name);
        log_indented!("Description: {}", identity.description);
        log_indented!("Path: {}", identity.path);
        log_indented!("Bus: {}", self.bus().as_str());
        log_indented!(
            "Dispatch interval: {}ms",
            self.dispatch_interval().as_millis()
        );
    }
}
