use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use service_agent::agent::{
    Agent, AgentEvent, AgentParams, AgentRequest, AgentState, SERVICE_RECORD, ServiceHandler,
    ServiceIdentity, ServiceManager, ShutdownOutcome,
};
use service_agent::io::{dbus::handle_owner_change, signals::handle_termination_signal};
use service_agent::logger::Log;

const PATH: &str = "/org/bluez/service_agent_1234";

/// Records every call made against the service manager.
#[derive(Clone, Default)]
struct RecordingManager {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingManager {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ServiceManager for RecordingManager {
    fn register_service(&self, identity: &ServiceIdentity) -> anyhow::Result<()> {
        self.record(format!(
            "RegisterService({}, {}, {})",
            identity.path, identity.name, identity.description
        ));
        Ok(())
    }

    fn register_record(&self, path: &str, record: &[u8]) -> anyhow::Result<()> {
        self.record(format!("RegisterServiceRecord({path}, {} bytes)", record.len()));
        Ok(())
    }

    fn unregister_service(&self, path: &str) -> anyhow::Result<()> {
        self.record(format!("UnregisterService({path})"));
        Ok(())
    }
}

fn registered_agent() -> (Agent<RecordingManager>, RecordingManager, Sender<AgentEvent>) {
    Log::set_enabled(false);

    let manager = RecordingManager::default();
    let (sender, receiver) = mpsc::channel();
    let agent = Agent::new(AgentParams {
        manager: manager.clone(),
        identity: ServiceIdentity {
            name: "Example service".to_string(),
            description: "Service agent with an example".to_string(),
            path: PATH.to_string(),
        },
        state: AgentState::new(),
        events: receiver,
        dispatch_interval: Duration::from_millis(20),
    });

    agent.register().unwrap();
    (agent, manager, sender)
}

fn unregister_count(manager: &RecordingManager) -> usize {
    manager
        .calls()
        .iter()
        .filter(|call| call.starts_with("UnregisterService"))
        .count()
}

#[test]
fn test_registration_order() {
    let (_agent, manager, _sender) = registered_agent();

    assert_eq!(
        manager.calls(),
        vec![
            format!("RegisterService({PATH}, Example service, Service agent with an example)"),
            format!("RegisterServiceRecord({PATH}, {} bytes)", SERVICE_RECORD.len()),
        ]
    );
}

#[test]
fn test_signal_shutdown_unregisters_exactly_once() {
    let (agent, manager, sender) = registered_agent();

    handle_termination_signal(signal_hook::consts::SIGTERM, agent.state(), &sender);

    assert_eq!(agent.run(), ShutdownOutcome::Unregistered);
    assert_eq!(unregister_count(&manager), 1);
    assert_eq!(manager.calls().last().unwrap(), &format!("UnregisterService({PATH})"));
}

#[test]
fn test_release_skips_unregister() {
    let (agent, manager, sender) = registered_agent();
    let handler = ServiceHandler::new(agent.state().clone(), sender);

    handler.handle(AgentRequest::Start);
    handler.handle(AgentRequest::Release);

    assert_eq!(agent.run(), ShutdownOutcome::Skipped);
    assert_eq!(unregister_count(&manager), 0);
}

#[test]
fn test_manager_exit_skips_unregister() {
    let (agent, manager, sender) = registered_agent();

    handle_owner_change("org.bluez", None, agent.state(), &sender);

    assert_eq!(agent.run(), ShutdownOutcome::Skipped);
    assert_eq!(unregister_count(&manager), 0);
}

#[test]
fn test_unrelated_owner_change_keeps_running() {
    let (agent, manager, sender) = registered_agent();

    handle_owner_change("org.freedesktop.NetworkManager", None, agent.state(), &sender);
    assert!(!agent.state().should_exit());

    // A later signal still shuts down with an unregister
    handle_termination_signal(signal_hook::consts::SIGINT, agent.state(), &sender);
    assert_eq!(agent.run(), ShutdownOutcome::Unregistered);
    assert_eq!(unregister_count(&manager), 1);
}
