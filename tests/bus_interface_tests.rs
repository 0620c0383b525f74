//! Exercises the agent's request dispatch over a private peer-to-peer
//! connection, so no bus daemon is needed.

use std::os::unix::net::UnixStream;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use service_agent::agent::{AgentEvent, AgentState, ServiceHandler, start_request_dispatch};
use service_agent::logger::Log;
use zbus::Guid;
use zbus::blocking::Connection;
use zbus::blocking::connection::Builder;

const PATH: &str = "/org/bluez/service_agent_test";
const INTERFACE: &str = "org.bluez.ServiceAgent";

struct Peers {
    client: Connection,
    _server: Connection,
    state: AgentState,
    events: mpsc::Receiver<AgentEvent>,
}

fn connect_agent() -> Peers {
    Log::set_enabled(false);

    let state = AgentState::new();
    let (sender, events) = mpsc::channel();
    let handler = ServiceHandler::new(state.clone(), sender);

    let (server_stream, client_stream) = UnixStream::pair().unwrap();
    let guid = Guid::generate();

    // Both ends must handshake concurrently
    let server = thread::spawn(move || {
        Builder::async_io_unix_stream(server_stream)
            .server(guid)
            .unwrap()
            .p2p()
            .build()
            .unwrap()
    });
    let client = Builder::async_io_unix_stream(client_stream)
        .p2p()
        .build()
        .unwrap();
    let server = server.join().unwrap();

    start_request_dispatch(&server, PATH, handler).unwrap();

    Peers {
        client,
        _server: server,
        state,
        events,
    }
}

fn call(client: &Connection, interface: &str, method: &str) -> zbus::Result<zbus::Message> {
    client.call_method(None::<&str>, PATH, Some(interface), method, &())
}

#[test]
fn test_start_replies_empty_success() {
    let peers = connect_agent();

    let reply = call(&peers.client, INTERFACE, "Start").unwrap();
    let () = reply.body().deserialize().unwrap();

    assert!(!peers.state.should_exit());
}

#[test]
fn test_stop_replies_empty_success() {
    let peers = connect_agent();

    let reply = call(&peers.client, INTERFACE, "Stop").unwrap();
    let () = reply.body().deserialize().unwrap();

    assert!(!peers.state.should_exit());
}

#[test]
fn test_release_replies_then_terminates() {
    let peers = connect_agent();

    let reply = call(&peers.client, INTERFACE, "Release").unwrap();
    let () = reply.body().deserialize().unwrap();

    // The flag follows the reply
    assert_eq!(
        peers.events.recv_timeout(Duration::from_secs(5)),
        Ok(AgentEvent::Released)
    );
    assert!(peers.state.is_terminated());
    assert!(!peers.state.is_canceled());
}

#[test]
fn test_unknown_method_is_rejected() {
    let peers = connect_agent();

    let err = call(&peers.client, INTERFACE, "Frobnicate").unwrap_err();
    assert!(err.to_string().contains("UnknownMethod"));
    assert!(!peers.state.should_exit());
}

#[test]
fn test_other_interface_is_rejected() {
    let peers = connect_agent();

    assert!(call(&peers.client, "org.freedesktop.DBus.Peer", "Release").is_err());
    assert!(!peers.state.should_exit());
}
