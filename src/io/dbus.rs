//! Bus connection and service manager monitoring.
//!
//! This module provides:
//! - Connecting to the system (or session) bus with zbus's blocking API
//! - Watching `NameOwnerChanged` for the service manager's well-known name, so
//!   the agent notices when the daemon exits and skips unregistering
//!
//! The ownership watch runs in its own thread and reports through the shared
//! [`AgentState`] and the dispatch loop's event channel.

use anyhow::{Context, Result};
use std::sync::mpsc::Sender;
use std::thread;
use zbus::blocking::Connection;
use zbus::blocking::fdo::DBusProxy;

use crate::agent::{AgentEvent, AgentState};
use crate::common::constants::MANAGER_BUS_NAME;
use crate::config::BusKind;

/// Connect to the requested message bus.
pub fn connect(bus: BusKind) -> Result<Connection> {
    let connection = match bus {
        BusKind::System => Connection::system().context("Can't get on system bus")?,
        BusKind::Session => Connection::session().context("Can't get on session bus")?,
    };

    log_debug!(
        "Connected to {} bus as {}",
        bus.as_str(),
        connection
            .unique_name()
            .map(|name| name.as_str())
            .unwrap_or("<unknown>")
    );

    Ok(connection)
}

/// Whether an ownership change means the service manager has gone away.
///
/// The bus reports a released name with an empty new owner.
pub fn is_service_terminated(name: &str, new_owner: Option<&str>) -> bool {
    name == MANAGER_BUS_NAME && new_owner.is_none_or(str::is_empty)
}

/// Apply one ownership change to the agent state.
///
/// Returns `false` once the dispatch loop is gone and watching can stop.
pub fn handle_owner_change(
    name: &str,
    new_owner: Option<&str>,
    state: &AgentState,
    events: &Sender<AgentEvent>,
) -> bool {
    log_debug!(
        "NameOwnerChanged: {name} -> {}",
        new_owner.unwrap_or("<none>")
    );

    if !is_service_terminated(name, new_owner) {
        return true;
    }

    log_pipe!();
    log_warning!("Service has been terminated");
    state.terminate();
    events.send(AgentEvent::ServiceTerminated).is_ok()
}

/// Subscribe to ownership changes of the service manager's name and watch
/// them in a dedicated thread.
///
/// # Returns
/// * `Ok(())` - If the subscription is in place
/// * `Err(...)` - If the match rule could not be added (the agent keeps running
///   without the watch)
pub fn start_owner_watch(
    connection: &Connection,
    state: AgentState,
    events: Sender<AgentEvent>,
) -> Result<()> {
    let dbus_proxy = DBusProxy::new(connection).context("Failed to create bus proxy")?;

    let owner_changes = dbus_proxy
        .receive_name_owner_changed_with_args(&[(0, MANAGER_BUS_NAME)])
        .context("Failed to subscribe to NameOwnerChanged signals")?;

    log_debug!("Watching ownership of {MANAGER_BUS_NAME}");

    thread::spawn(move || {
        for signal in owner_changes {
            match signal.args() {
                Ok(args) => {
                    let new_owner: &Option<zbus::names::UniqueName<'_>> = args.new_owner();
                    let keep_watching = handle_owner_change(
                        args.name().as_str(),
                        new_owner.as_ref().map(|owner| owner.as_str()),
                        &state,
                        &events,
                    );
                    if !keep_watching {
                        return;
                    }
                }
                Err(e) => {
                    log_pipe!();
                    log_warning!("Invalid arguments for NameOwnerChanged signal: {e}");
                }
            }
        }

        // Signal stream ended - connection lost
        let _ = events.send(AgentEvent::Disconnected);
    });

    Ok(())
}
