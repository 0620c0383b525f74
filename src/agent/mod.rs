//! Agent lifecycle: registration, the dispatch loop and shutdown.
//!
//! The lifecycle is strictly linear and runs on the calling thread:
//!
//! 1. [`Agent::register`] exports the agent and registers the service, then its
//!    discovery record. Either failure is fatal.
//! 2. [`Agent::run`] waits on the event channel with a bounded timeout until a
//!    local signal or a remote termination sets a flag on [`AgentState`].
//! 3. Unless the service manager already let go of us, the service is
//!    unregistered exactly once. That failure is logged, never fatal.
//!
//! Incoming method calls are answered on their own thread, which only touches the
//! shared flags and the event channel once the reply is sent.

pub mod handler;
pub mod manager;
pub mod record;
pub mod state;

use anyhow::{Context, Result};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

pub use handler::{AgentRequest, ServiceHandler, start_request_dispatch};
pub use manager::{BusServiceManager, ServiceManager};
pub use record::SERVICE_RECORD;
pub use state::{AgentEvent, AgentState};

/// The three strings that identify the registered service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub name: String,
    pub description: String,
    /// Object path the agent is exported at
    pub path: String,
}

/// Why the dispatch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// A local termination signal was received
    Canceled,
    /// The service manager released us or disappeared
    Terminated,
    /// The bus went away or no event producer is left
    Disconnected,
}

/// What the shutdown step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    Unregistered,
    /// Skipped because the service manager already dropped the registration
    Skipped,
    /// The unregister call failed; already logged
    Failed,
}

/// Parameters for creating an [`Agent`].
pub struct AgentParams<M: ServiceManager> {
    pub manager: M,
    pub identity: ServiceIdentity,
    pub state: AgentState,
    pub events: Receiver<AgentEvent>,
    pub dispatch_interval: Duration,
}

pub struct Agent<M: ServiceManager> {
    manager: M,
    identity: ServiceIdentity,
    state: AgentState,
    events: Receiver<AgentEvent>,
    dispatch_interval: Duration,
}

impl<M: ServiceManager> Agent<M> {
    pub fn new(params: AgentParams<M>) -> Self {
        Self {
            manager: params.manager,
            identity: params.identity,
            state: params.state,
            events: params.events,
            dispatch_interval: params.dispatch_interval,
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Register the service and its discovery record.
    pub fn register(&self) -> Result<()> {
        log_block_start!("Registering service at {}", self.identity.path);
        log_indented!("Name: {}", self.identity.name);
        log_indented!("Description: {}", self.identity.description);

        self.manager
            .register_service(&self.identity)
            .context("Service registration failed")?;

        self.manager
            .register_record(&self.identity.path, &SERVICE_RECORD)
            .context("Service record registration failed")?;

        log_decorated!("Service registered, waiting for requests...");
        Ok(())
    }

    /// Run the dispatch loop, then unregister if still registered.
    pub fn run(&self) -> ShutdownOutcome {
        let exit = self.run_dispatch_loop();
        log_debug!("Dispatch loop finished: {exit:?}");
        self.shutdown()
    }

    /// Wait for events until a termination flag is set.
    pub fn run_dispatch_loop(&self) -> LoopExit {
        loop {
            if self.state.is_terminated() {
                return LoopExit::Terminated;
            }
            if self.state.is_canceled() {
                return LoopExit::Canceled;
            }

            match self.events.recv_timeout(self.dispatch_interval) {
                Ok(AgentEvent::Disconnected) => {
                    log_pipe!();
                    log_warning!("Lost connection to the message bus");
                    return LoopExit::Disconnected;
                }
                Ok(event) => {
                    log_debug!("Dispatch loop woke up: {event:?}");
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log_debug!("All event producers are gone");
                    return LoopExit::Disconnected;
                }
            }
        }
    }

    /// Unregister the service unless the service manager already released it.
    pub fn shutdown(&self) -> ShutdownOutcome {
        if self.state.is_terminated() {
            log_block_start!("Service manager released the service, nothing to unregister");
            return ShutdownOutcome::Skipped;
        }

        log_block_start!("Unregistering service at {}", self.identity.path);
        match self.manager.unregister_service(&self.identity.path) {
            Ok(()) => ShutdownOutcome::Unregistered,
            Err(e) => {
                log_error!("{e:#}");
                ShutdownOutcome::Failed
            }
        }
    }
}
