//! Signal handling for the service agent.
//!
//! SIGINT and SIGTERM request a graceful shutdown: the signal thread sets the
//! cancellation flag and wakes the dispatch loop. Nothing else happens in
//! response to a signal; unregistering is left to the main thread.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::sync::mpsc::Sender;
use std::thread;

use crate::agent::{AgentEvent, AgentState};

/// Record a termination request.
///
/// Returns `false` once the dispatch loop is gone.
pub fn handle_termination_signal(
    signal: i32,
    state: &AgentState,
    events: &Sender<AgentEvent>,
) -> bool {
    let user_message = match signal {
        SIGINT => "Received interrupt signal, initiating graceful shutdown...",
        SIGTERM => "Received termination request, initiating graceful shutdown...",
        _ => "Received shutdown signal, initiating graceful shutdown...",
    };

    log_pipe!();
    log_info!("{}", user_message);

    state.cancel();
    events.send(AgentEvent::Shutdown).is_ok()
}

/// Set up signal handling for the agent.
///
/// Spawns a background thread that turns SIGINT/SIGTERM into a cancellation
/// of `state` and a [`AgentEvent::Shutdown`] on `events`.
pub fn setup_signal_handler(state: AgentState, events: Sender<AgentEvent>) -> Result<()> {
    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("failed to register signal handlers")?;

    thread::spawn(move || {
        for sig in signals.forever() {
            if !handle_termination_signal(sig, &state, &events) {
                // Main loop appears to have already exited
                break;
            }
        }
    });

    Ok(())
}
