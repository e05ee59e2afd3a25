//! Destination adapters: self-contained capability records describing how to detect and call one
//! third-party destination.

use std::fmt;

use serde::Serialize;

use crate::Properties;

/// Zero-argument predicate reporting whether a destination's runtime library is currently present
/// and initialized.
///
/// The probe is evaluated fresh on every dispatch call and its result is never cached, so a
/// destination that finishes loading between two calls starts receiving events on the second one.
/// Probes must be pure: no side effects, safe to invoke repeatedly.
pub type Probe = Box<dyn Fn() -> bool + Send + Sync>;

/// Handler invoked for `identify` calls, with the user id and optional user traits.
pub type IdentifyHandler = Box<dyn Fn(&str, Option<&Properties>) + Send + Sync>;
/// Handler invoked for `track` calls, with the event name and optional event properties.
pub type TrackHandler = Box<dyn Fn(&str, Option<&Properties>) + Send + Sync>;
/// Handler invoked for `page` calls, with the category, page name, and merged page properties.
pub type PageHandler = Box<dyn Fn(Option<&str>, Option<&str>, &Properties) + Send + Sync>;
/// Handler invoked for `group` calls, with the group id and optional group traits.
pub type GroupHandler = Box<dyn Fn(&str, Option<&Properties>) + Send + Sync>;
/// Handler invoked for `alias` calls, with the new user id and the previous id.
pub type AliasHandler = Box<dyn Fn(&str, &str) + Send + Sync>;

/// The analytics operations a destination may handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Attach an identity (and optional traits) to the current user.
    Identify,
    /// Record a named event with optional properties.
    Track,
    /// Record a page view.
    Page,
    /// Associate the current user with a group or account.
    Group,
    /// Link a new user id to a previously known id.
    Alias,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Identify => "identify",
            Operation::Track => "track",
            Operation::Page => "page",
            Operation::Group => "group",
            Operation::Alias => "alias",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-operation handler slots for one destination.
///
/// A destination need not implement all five operations: an empty slot skips that destination for
/// that operation only, which is valid and silent.
#[derive(Default)]
pub struct Handlers {
    pub identify: Option<IdentifyHandler>,
    pub track: Option<TrackHandler>,
    pub page: Option<PageHandler>,
    pub group: Option<GroupHandler>,
    pub alias: Option<AliasHandler>,
}

/// A self-contained capability record for one destination: an enable flag, an availability probe,
/// and zero or more operation handlers.
///
/// Adapters are registered into an [`AdapterRegistry`](crate::registry::AdapterRegistry) once at
/// client construction and are immutable thereafter. A disabled adapter is never invoked,
/// regardless of what its probe reports, and an adapter is never invoked for an operation whose
/// handler slot is empty.
///
/// # Examples
/// ```
/// # use beacon_core::adapter::Adapter;
/// let adapter = Adapter::builder("console")
///     .probe(|| true)
///     .track(|event_name, _properties| println!("{event_name}"))
///     .build();
/// ```
pub struct Adapter {
    name: String,
    enabled: bool,
    probe: Probe,
    handlers: Handlers,
}

impl Adapter {
    /// Start building an adapter named `name`. Adapters start enabled, with a probe that always
    /// reports absent and no handlers.
    pub fn builder(name: impl Into<String>) -> AdapterBuilder {
        AdapterBuilder {
            name: name.into(),
            enabled: true,
            probe: None,
            handlers: Handlers::default(),
        }
    }

    /// The destination name, unique within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the adapter is enabled. Disabled adapters are always skipped.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Evaluate the availability probe.
    pub fn probe(&self) -> bool {
        (self.probe)()
    }

    /// The per-operation handler slots.
    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Whether the adapter implements a handler for `operation`.
    pub fn supports(&self, operation: Operation) -> bool {
        match operation {
            Operation::Identify => self.handlers.identify.is_some(),
            Operation::Track => self.handlers.track.is_some(),
            Operation::Page => self.handlers.page.is_some(),
            Operation::Group => self.handlers.group.is_some(),
            Operation::Alias => self.handlers.alias.is_some(),
        }
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Adapter`]. Created with [`Adapter::builder`].
pub struct AdapterBuilder {
    name: String,
    enabled: bool,
    probe: Option<Probe>,
    handlers: Handlers,
}

impl AdapterBuilder {
    /// Enable or disable the adapter. Enabled is the default; `enabled(false)` is the safe
    /// setting for template slots that are not wired up yet.
    pub fn enabled(mut self, enabled: bool) -> AdapterBuilder {
        self.enabled = enabled;
        self
    }

    /// Set the availability probe. An adapter without a probe is treated as never present.
    pub fn probe(mut self, probe: impl Fn() -> bool + Send + Sync + 'static) -> AdapterBuilder {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Set the `identify` handler.
    pub fn identify(
        mut self,
        handler: impl Fn(&str, Option<&Properties>) + Send + Sync + 'static,
    ) -> AdapterBuilder {
        self.handlers.identify = Some(Box::new(handler));
        self
    }

    /// Set the `track` handler.
    pub fn track(
        mut self,
        handler: impl Fn(&str, Option<&Properties>) + Send + Sync + 'static,
    ) -> AdapterBuilder {
        self.handlers.track = Some(Box::new(handler));
        self
    }

    /// Set the `page` handler.
    pub fn page(
        mut self,
        handler: impl Fn(Option<&str>, Option<&str>, &Properties) + Send + Sync + 'static,
    ) -> AdapterBuilder {
        self.handlers.page = Some(Box::new(handler));
        self
    }

    /// Set the `group` handler.
    pub fn group(
        mut self,
        handler: impl Fn(&str, Option<&Properties>) + Send + Sync + 'static,
    ) -> AdapterBuilder {
        self.handlers.group = Some(Box::new(handler));
        self
    }

    /// Set the `alias` handler.
    pub fn alias(
        mut self,
        handler: impl Fn(&str, &str) + Send + Sync + 'static,
    ) -> AdapterBuilder {
        self.handlers.alias = Some(Box::new(handler));
        self
    }

    /// Finish building the adapter.
    pub fn build(self) -> Adapter {
        Adapter {
            name: self.name,
            enabled: self.enabled,
            probe: self.probe.unwrap_or_else(|| Box::new(|| false)),
            handlers: self.handlers,
        }
    }
}
