//! Ordered storage of destination adapters. The registry owns no behavior beyond storage and
//! iteration order; all dispatch decisions live in
//! [`Dispatcher`](crate::dispatch::Dispatcher).

use crate::adapter::Adapter;

/// An ordered collection of destination adapters, keyed by destination name.
///
/// Iteration order is registration order, and fan-out follows it deterministically. No ordering
/// guarantee is made *between* destinations regarding side effects, so destinations must not
/// depend on the order they are called in.
///
/// A registry is constructed and populated when the client is built and is not mutated
/// afterwards. It is an explicit value owned by the application (not module-level state), so
/// tests can run multiple independent registries side by side.
#[derive(Debug, Default)]
pub struct AdapterRegistry {
    adapters: Vec<Adapter>,
}

impl AdapterRegistry {
    /// Create a new empty registry.
    pub fn new() -> AdapterRegistry {
        AdapterRegistry::default()
    }

    /// Add `adapter`, replacing any previously registered adapter with the same name.
    ///
    /// Replacement keeps the original registration position, so re-registering a destination
    /// does not move it to the back of the fan-out order.
    pub fn register(&mut self, adapter: Adapter) {
        if let Some(slot) = self
            .adapters
            .iter_mut()
            .find(|registered| registered.name() == adapter.name())
        {
            *slot = adapter;
        } else {
            self.adapters.push(adapter);
        }
    }

    /// Iterate adapters in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Adapter> {
        self.adapters.iter()
    }

    /// Look up an adapter by destination name.
    pub fn get(&self, name: &str) -> Option<&Adapter> {
        self.adapters.iter().find(|adapter| adapter.name() == name)
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether the registry has no adapters.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
