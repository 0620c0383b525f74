//! Application constants and defaults.
//!
//! Bus names, object paths and interface names are fixed by the service
//! manager; everything else here is a default the configuration file or the
//! command line may override.

use std::time::Duration;

// # Remote service manager

/// Well-known bus name of the service manager.
pub const MANAGER_BUS_NAME: &str = "org.bluez";

/// Interface carrying `RegisterServiceRecord`, addressed at the service path.
pub const RECORD_INTERFACE: &str = "org.bluez.Service";

/// Method that registers the discovery record.
pub const REGISTER_RECORD_METHOD: &str = "RegisterServiceRecord";

/// Interface we export at the service path.
pub const AGENT_INTERFACE: &str = "org.bluez.ServiceAgent";

// # Service identity defaults

pub const DEFAULT_SERVICE_NAME: &str = "Example service";
pub const DEFAULT_SERVICE_DESCRIPTION: &str = "Service agent with an example";

/// Prefix of the default object path; the process id is appended.
pub const DEFAULT_PATH_PREFIX: &str = "/org/bluez/service_agent_";

// # Dispatch loop

/// Bounded wait of a single dispatch iteration.
pub const DEFAULT_DISPATCH_INTERVAL_MS: u64 = 500;
pub const MINIMUM_DISPATCH_INTERVAL_MS: u64 = 10;
pub const MAXIMUM_DISPATCH_INTERVAL_MS: u64 = 60_000;

pub const DEFAULT_DISPATCH_INTERVAL: Duration = Duration::from_millis(DEFAULT_DISPATCH_INTERVAL_MS);

// # Configuration

pub const CONFIG_DIR_NAME: &str = "service-agent";
pub const CONFIG_FILE_NAME: &str = "service-agent.toml";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
