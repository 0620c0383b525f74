//! Registration calls against the remote service manager.
//!
//! [`ServiceManager`] is the seam between the agent lifecycle and the bus:
//! [`BusServiceManager`] talks to the real daemon through zbus, tests use a mock.

use anyhow::{Context, Result};
use zbus::blocking::{Connection, Proxy};

use super::ServiceIdentity;
use super::handler::{ServiceHandler, start_request_dispatch};
use crate::common::constants::*;

/// D-Bus proxy trait for the service manager's Manager interface.
#[zbus::proxy(
    interface = "org.bluez.Manager",
    default_service = "org.bluez",
    default_path = "/org/bluez"
)]
trait Manager {
    /// Announce a service agent living at `path`.
    fn register_service(&self, path: &str, name: &str, description: &str) -> zbus::Result<()>;

    /// Withdraw the service agent living at `path`.
    fn unregister_service(&self, path: &str) -> zbus::Result<()>;
}

/// Blocking registration operations, one remote call each.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceManager {
    /// Make the agent reachable at `identity.path` and announce it.
    fn register_service(&self, identity: &ServiceIdentity) -> Result<()>;

    /// Attach the discovery record to the service registered at `path`.
    fn register_record(&self, path: &str, record: &[u8]) -> Result<()>;

    /// Withdraw the service registered at `path`.
    fn unregister_service(&self, path: &str) -> Result<()>;
}

/// [`ServiceManager`] backed by a bus connection.
pub struct BusServiceManager {
    connection: Connection,
    handler: ServiceHandler,
}

impl BusServiceManager {
    pub fn new(connection: Connection, handler: ServiceHandler) -> Self {
        Self {
            connection,
            handler,
        }
    }

    fn manager_proxy(&self) -> Result<ManagerProxyBlocking<'static>> {
        ManagerProxyBlocking::new(&self.connection).context("Failed to create service manager proxy")
    }
}

impl ServiceManager for BusServiceManager {
    fn register_service(&self, identity: &ServiceIdentity) -> Result<()> {
        start_request_dispatch(&self.connection, &identity.path, self.handler.clone())
            .context("Can't register object path for service")?;

        log_debug!("Answering {} calls at {}", AGENT_INTERFACE, identity.path);

        self.manager_proxy()?
            .register_service(&identity.path, &identity.name, &identity.description)
            .context("Can't register service agent")?;

        Ok(())
    }

    fn register_record(&self, path: &str, record: &[u8]) -> Result<()> {
        let proxy = Proxy::new(&self.connection, MANAGER_BUS_NAME, path, RECORD_INTERFACE)
            .context("Failed to create service record proxy")?;

        // Any reply body (such as a record handle) is not needed
        proxy
            .call_method(REGISTER_RECORD_METHOD, &(record,))
            .context("Can't register service record")?;

        Ok(())
    }

    fn unregister_service(&self, path: &str) -> Result<()> {
        self.manager_proxy()?
            .unregister_service(path)
            .context("Can't unregister service agent")?;

        Ok(())
    }
}
