//! Termination flags and the events that wake the dispatch loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Messages posted into the dispatch loop.
///
/// Each producer sets the matching flag on [`AgentState`] before sending, so the
/// loop's decision never depends on whether a message was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// SIGINT or SIGTERM was received
    Shutdown,
    /// The service manager called `Release`
    Released,
    /// The service manager's bus name lost its owner
    ServiceTerminated,
    /// The bus signal stream ended
    Disconnected,
}

/// Shared termination state.
///
/// Both flags are monotonic: once set they stay set until the process exits.
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    /// A local termination signal was received
    canceled: Arc<AtomicBool>,
    /// The service manager released us or went away; unregistering is pointless
    terminated: Arc<AtomicBool>,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn terminate(&self) {
        self.terminated.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    pub fn should_exit(&self) -> bool {
        self.is_canceled() || self.is_terminated()
    }
}
