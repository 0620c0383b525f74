//! Handling of the calls the service manager makes on our object.

use anyhow::{Context, Result};
use std::sync::mpsc::Sender;
use std::thread;
use zbus::blocking::{Connection, MessageIterator};
use zbus::message::{Flags, Type};
use zbus::{MatchRule, Message};

use super::state::{AgentEvent, AgentState};
use crate::common::constants::AGENT_INTERFACE;

/// Remote calls answered by the agent. All take no arguments and return nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRequest {
    Start,
    Stop,
    Release,
}

impl AgentRequest {
    /// Map a method name of the agent interface to a request.
    pub fn from_member(member: &str) -> Option<Self> {
        match member {
            "Start" => Some(Self::Start),
            "Stop" => Some(Self::Stop),
            "Release" => Some(Self::Release),
            _ => None,
        }
    }
}

/// Applies remote requests to the agent state.
#[derive(Debug, Clone)]
pub struct ServiceHandler {
    state: AgentState,
    events: Sender<AgentEvent>,
}

impl ServiceHandler {
    pub fn new(state: AgentState, events: Sender<AgentEvent>) -> Self {
        Self { state, events }
    }

    /// Apply one request. Its empty success reply has already been sent.
    pub fn handle(&self, request: AgentRequest) {
        match request {
            AgentRequest::Start => {
                log_info!("Starting example service");
            }
            AgentRequest::Stop => {
                log_info!("Stopping example service");
            }
            AgentRequest::Release => {
                // Quiet when we are already on our way out
                if !self.state.is_canceled() {
                    log_pipe!();
                    log_warning!("Service has been released");
                }

                self.state.terminate();

                // The loop may already be gone; the flag is what counts
                let _ = self.events.send(AgentEvent::Released);
            }
        }
    }
}

/// Answer method calls addressed to `path` in a dedicated thread.
///
/// Every call is answered before its effect is applied, so a `Release` reply is
/// on the wire before the dispatch loop can notice the release and exit.
pub fn start_request_dispatch(
    connection: &Connection,
    path: &str,
    handler: ServiceHandler,
) -> Result<()> {
    let rule = MatchRule::builder()
        .msg_type(Type::MethodCall)
        .path(path)
        .context("Invalid service path")?
        .build();

    let calls = MessageIterator::for_match_rule(rule, connection, None)
        .context("Failed to receive method calls")?;
    let connection = connection.clone();

    thread::spawn(move || {
        for call in calls {
            match call {
                Ok(call) => {
                    if let Err(e) = answer_call(&connection, &call, &handler) {
                        log_pipe!();
                        log_warning!("{e:#}");
                    }
                }
                Err(e) => {
                    log_debug!("Skipping unreadable method call: {e}");
                }
            }
        }

        log_debug!("Stopped answering agent requests");
    });

    Ok(())
}

/// Reply to one method call, then apply it.
fn answer_call(connection: &Connection, call: &Message, handler: &ServiceHandler) -> Result<()> {
    let header = call.header();
    let expects_reply = !header.primary().flags().contains(Flags::NoReplyExpected);
    let interface = header.interface().map(|name| name.as_str());
    let member = header.member().map(|name| name.as_str()).unwrap_or_default();

    let request = match interface {
        None | Some(AGENT_INTERFACE) => AgentRequest::from_member(member),
        Some(_) => None,
    };

    let Some(request) = request else {
        log_debug!("Rejecting {}.{member}", interface.unwrap_or("<none>"));
        if expects_reply {
            connection
                .reply_dbus_error(
                    &header,
                    zbus::fdo::Error::UnknownMethod(format!("Unknown method {member}")),
                )
                .context("Failed to send error reply")?;
        }
        return Ok(());
    };

    if expects_reply {
        connection
            .reply(&header, &())
            .with_context(|| format!("Failed to reply to {member}"))?;
    }

    handler.handle(request);
    Ok(())
}
