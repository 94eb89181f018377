use crate::client::Client;
use searchkit_core::{ConnectionConfig, Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Connection name used when callers do not care to pick one.
pub const DEFAULT_CONNECTION: &str = "default";

/// Named-configuration store with a cache of constructed clients.
///
/// Configurations are registered up front with [`configure`](Self::configure);
/// clients are built lazily on the first [`connection`](Self::connection) call
/// for a name and reused for the life of the registry, so at most one client
/// exists per name. A name with no stored configuration is an error, never a
/// silently defaulted client.
#[derive(Default)]
pub struct ConnectionRegistry {
    configs: Mutex<HashMap<String, ConnectionConfig>>,
    clients: Mutex<HashMap<String, Arc<Client>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite the configuration for `name`. No I/O happens here;
    /// overwriting does not invalidate an already-constructed client.
    pub fn configure(&self, name: impl Into<String>, config: ConnectionConfig) {
        let mut configs = self
            .configs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        configs.insert(name.into(), config);
    }

    /// Return the cached client for `name`, constructing it on first access.
    ///
    /// The check-and-set runs under the cache lock, so concurrent first
    /// calls for the same name build exactly one client.
    pub fn connection(&self, name: &str) -> Result<Arc<Client>> {
        let mut clients = self
            .clients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(client) = clients.get(name) {
            return Ok(Arc::clone(client));
        }

        let config = {
            let configs = self
                .configs
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            configs
                .get(name)
                .cloned()
                .ok_or_else(|| Error::ConfigurationNotFound(name.to_string()))?
        };

        debug!("Constructing client for connection `{}`", name);
        let client = Arc::new(Client::new(config)?);
        clients.insert(name.to_string(), Arc::clone(&client));
        Ok(client)
    }
}
