//! # Service Agent Library
//!
//! Internal library for the `service-agent` binary.
//!
//! The agent registers an example service with the Bluetooth service manager
//! over the system bus, answers `Start`, `Stop` and `Release` calls, and
//! unregisters itself when it is asked to stop.
//!
//! ## Architecture
//!
//! - **Entry Point**: `main.rs` parses arguments and hands them to `AgentRunner`
//!   (`runner`), which resolves the `ServiceIdentity` and drives the lifecycle
//! - **Agent**: registration, the dispatch loop and shutdown (`agent`)
//! - **Configuration**: optional TOML defaults (`config`)
//! - **Infrastructure**: bus connection, ownership watch and signal handling (`io`)

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod agent;
pub mod args;
pub mod common;
pub mod config;
pub mod io;
mod runner;

pub use agent::{Agent, ServiceIdentity};
pub use runner::AgentRunner;
