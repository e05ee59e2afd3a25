use std::time::Duration;

use beacon_core::adapter::Adapter;
use beacon_core::page_context::PageMetadata;
use beacon_core::ready::ReadyTimer;
use beacon_core::registry::AdapterRegistry;

use crate::Client;

/// Configuration for [`Client`].
///
/// # Examples
/// ```
/// # use beacon::{adapters, ClientConfig};
/// let client = ClientConfig::new()
///     .adapter(adapters::blank::adapter("my-destination"))
///     .to_client();
/// ```
pub struct ClientConfig {
    pub(crate) registry: AdapterRegistry,
    pub(crate) ready_delay: Duration,
    pub(crate) page_metadata: Option<Box<dyn PageMetadata>>,
}

impl ClientConfig {
    /// Default delay after which the ready callback fires if no operation is dispatched.
    pub const DEFAULT_READY_DELAY: Duration = ReadyTimer::DEFAULT_DELAY;

    /// Create a configuration with an empty adapter registry.
    pub fn new() -> ClientConfig {
        ClientConfig {
            registry: AdapterRegistry::new(),
            ready_delay: ClientConfig::DEFAULT_READY_DELAY,
            page_metadata: None,
        }
    }

    /// Register a destination adapter.
    ///
    /// Fan-out order is registration order. Registering a second adapter with the same name
    /// replaces the first, keeping its position.
    pub fn adapter(mut self, adapter: Adapter) -> ClientConfig {
        self.registry.register(adapter);
        self
    }

    /// Replace the adapter registry wholesale.
    pub fn registry(mut self, registry: AdapterRegistry) -> ClientConfig {
        self.registry = registry;
        self
    }

    /// Override the ready fallback delay.
    ///
    /// Defaults to [`ClientConfig::DEFAULT_READY_DELAY`].
    pub fn ready_delay(mut self, delay: Duration) -> ClientConfig {
        self.ready_delay = delay;
        self
    }

    /// Set the provider of ambient page metadata merged into the properties of `page` calls.
    ///
    /// Without a provider, `page` properties pass through unchanged.
    pub fn page_metadata(mut self, provider: impl PageMetadata + 'static) -> ClientConfig {
        self.page_metadata = Some(Box::new(provider));
        self
    }

    /// Create a new [`Client`] using the specified configuration.
    ///
    /// ```
    /// # use beacon::{Client, ClientConfig};
    /// let client: Client = ClientConfig::new().to_client();
    /// ```
    pub fn to_client(self) -> Client {
        Client::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> ClientConfig {
        ClientConfig::new()
    }
}
