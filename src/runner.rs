//! Application coordinator that manages the complete lifecycle of the agent.
//!
//! This module handles resource acquisition and orchestration:
//! - Configuration loading and identity resolution
//! - Bus connection
//! - Signal handler setup
//! - Registration through [`Agent`]
//! - Ownership watch
//! - Dispatch loop and unregistering
//!
//! The `AgentRunner` struct uses a builder pattern so `main` only forwards the
//! parsed command line:
//!
//! ```no_run
//! use service_agent::AgentRunner;
//!
//! # fn main() -> anyhow::Result<()> {
//! AgentRunner::new(false)
//!     .with_name(Some("Serial".to_string()))
//!     .with_path(Some("/org/example/serial".to_string()))
//!     .run()?;
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::agent::{Agent, AgentParams, AgentState, BusServiceManager, ServiceHandler};
use crate::config::{self, CliOverrides};
use crate::io::{dbus, signals::setup_signal_handler};
use crate::logger::Log;

/// Builder for configuring and running the service agent.
pub struct AgentRunner {
    debug_enabled: bool,
    config_dir: Option<PathBuf>,
    overrides: CliOverrides,
}

impl AgentRunner {
    /// Create a new runner with defaults matching a plain `service-agent` run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            config_dir: None,
            overrides: CliOverrides::default(),
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.overrides.name = name;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.overrides.description = description;
        self
    }

    pub fn with_path(mut self, path: Option<String>) -> Self {
        self.overrides.path = path;
        self
    }

    /// Use a custom configuration directory (`--config`)
    pub fn with_config_dir(mut self, dir: Option<String>) -> Self {
        self.config_dir = dir.map(PathBuf::from);
        self
    }

    /// Execute the agent.
    ///
    /// Returns `Err` for every failure before the dispatch loop starts. After
    /// that point the run always succeeds; an unregister failure is only logged.
    pub fn run(self) -> Result<()> {
        Log::set_debug(self.debug_enabled);

        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - showing bus operations");
        }

        let config = config::load(self.config_dir.as_deref())?;

        let pid = nix::unistd::getpid().as_raw().unsigned_abs();
        let identity = config.resolve_identity(self.overrides, pid);

        if self.debug_enabled {
            config.log_config(&identity);
        }

        let connection = dbus::connect(config.bus())?;

        let state = AgentState::new();
        let (event_sender, event_receiver) = mpsc::channel();
        let handler = ServiceHandler::new(state.clone(), event_sender.clone());

        let agent = Agent::new(AgentParams {
            manager: BusServiceManager::new(connection.clone(), handler),
            identity,
            state: state.clone(),
            events: event_receiver,
            dispatch_interval: config.dispatch_interval(),
        });

        // A signal during registration is honoured as soon as the loop starts
        setup_signal_handler(state.clone(), event_sender.clone())?;

        agent.register()?;

        // Non-fatal: the agent keeps running without the watch
        if let Err(e) = dbus::start_owner_watch(&connection, state, event_sender) {
            log_pipe!();
            log_warning!("Can't add signal filter: {e:#}");
        }

        let outcome = agent.run();
        log_debug!("Shutdown outcome: {outcome:?}");

        log_end!();
        Ok(())
    }
}
