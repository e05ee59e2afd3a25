//! Readiness-gated fan-out of analytics operations to registered destinations.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapter::{Handlers, Operation};
use crate::page_context::{PageContext, PageMetadata};
use crate::ready::ReadinessGate;
use crate::registry::AdapterRegistry;
use crate::Properties;

/// Reserved per-call options.
///
/// Currently unused; carried through the dispatch surface so future options (e.g., destination
/// selection) do not occupy the callback position.
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct CallOptions {}

impl CallOptions {
    /// Create empty options.
    pub fn new() -> CallOptions {
        CallOptions::default()
    }
}

/// Completion callback invoked with no arguments after fan-out finishes.
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// One dispatched operation. Ephemeral; exists for structured logging only.
#[derive(Debug, Clone, Copy, Serialize)]
struct DispatchCall {
    operation: Operation,
    created_at: DateTime<Utc>,
}

impl DispatchCall {
    fn new(operation: Operation) -> DispatchCall {
        DispatchCall {
            operation,
            created_at: Utc::now(),
        }
    }
}

/// The dispatch engine: fans each operation out to every enabled, probe-passing destination that
/// implements a handler for it.
///
/// For each call the engine triggers the [`ReadinessGate`] first, normalizes and enriches
/// arguments, iterates the registry in registration order, filters each adapter by its enable
/// flag, availability probe, and handler presence, and invokes the matching handler. A
/// destination that is absent, that does not handle the operation, or that fails, is skipped
/// without surfacing anything to the caller.
pub struct Dispatcher {
    registry: AdapterRegistry,
    gate: Arc<ReadinessGate>,
    page_metadata: Option<Box<dyn PageMetadata>>,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`, triggering `gate` on every operation.
    ///
    /// `page_metadata` enriches `page` calls; pass `None` when the environment carries no page
    /// metadata (e.g., outside a document context) and `page` properties pass through unchanged.
    pub fn new(
        registry: AdapterRegistry,
        gate: Arc<ReadinessGate>,
        page_metadata: Option<Box<dyn PageMetadata>>,
    ) -> Dispatcher {
        Dispatcher {
            registry,
            gate,
            page_metadata,
        }
    }

    /// The adapter registry this dispatcher fans out to.
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Fan an `identify` call out to every eligible destination.
    ///
    /// The engine itself does not validate `user_id`; destinations individually guard against
    /// missing required fields before acting.
    pub fn identify(
        &self,
        user_id: &str,
        traits: Option<&Properties>,
        _options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.gate.trigger();
        self.fan_out(DispatchCall::new(Operation::Identify), callback, |handlers| {
            handlers
                .identify
                .as_ref()
                .map(|handler| handler(user_id, traits))
                .is_some()
        });
    }

    /// Fan a `track` call out to every eligible destination.
    pub fn track(
        &self,
        event_name: &str,
        properties: Option<&Properties>,
        _options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.gate.trigger();
        self.fan_out(DispatchCall::new(Operation::Track), callback, |handlers| {
            handlers
                .track
                .as_ref()
                .map(|handler| handler(event_name, properties))
                .is_some()
        });
    }

    /// Fan a `page` call out to every eligible destination.
    ///
    /// Supports the category-omitted overload: when only the first positional argument is given,
    /// it is the page name, and `category` becomes `None`. After normalization the ambient page
    /// context is resolved and merged under `properties` (caller wins on key collision), and the
    /// merged record is handed to every page handler.
    pub fn page(
        &self,
        category: Option<&str>,
        name: Option<&str>,
        properties: Option<&Properties>,
        _options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.gate.trigger();

        // Handle not passing the category (shift right).
        let (category, name) = match (category, name) {
            (Some(category), None) => (None, Some(category)),
            other => other,
        };

        let merged = match &self.page_metadata {
            Some(provider) => PageContext::resolve(provider.as_ref()).merged_into(properties),
            None => properties.cloned().unwrap_or_default(),
        };

        self.fan_out(DispatchCall::new(Operation::Page), callback, |handlers| {
            handlers
                .page
                .as_ref()
                .map(|handler| handler(category, name, &merged))
                .is_some()
        });
    }

    /// Fan a `group` call out to every eligible destination.
    pub fn group(
        &self,
        group_id: &str,
        traits: Option<&Properties>,
        _options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.gate.trigger();
        self.fan_out(DispatchCall::new(Operation::Group), callback, |handlers| {
            handlers
                .group
                .as_ref()
                .map(|handler| handler(group_id, traits))
                .is_some()
        });
    }

    /// Fan an `alias` call out to every eligible destination.
    pub fn alias(
        &self,
        user_id: &str,
        previous_id: &str,
        _options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.gate.trigger();
        self.fan_out(DispatchCall::new(Operation::Alias), callback, |handlers| {
            handlers
                .alias
                .as_ref()
                .map(|handler| handler(user_id, previous_id))
                .is_some()
        });
    }

    /// Iterate the registry in registration order, invoking `invoke` for each enabled adapter
    /// whose probe passes. `invoke` reports whether the adapter implements a handler for the
    /// operation.
    ///
    /// Each handler invocation runs inside its own unwind boundary: a panicking destination is
    /// logged and never aborts the remaining destinations or the completion callback.
    fn fan_out(
        &self,
        call: DispatchCall,
        callback: Option<CompletionCallback>,
        invoke: impl Fn(&Handlers) -> bool,
    ) {
        log::trace!(target: "beacon", call:serde; "dispatching");

        for adapter in self.registry.all() {
            if !adapter.is_enabled() {
                continue;
            }
            if !adapter.probe() {
                log::trace!(target: "beacon",
                            destination = adapter.name();
                            "destination not present, skipping");
                continue;
            }

            match catch_unwind(AssertUnwindSafe(|| invoke(adapter.handlers()))) {
                Ok(true) => {
                    log::trace!(target: "beacon",
                                destination = adapter.name(),
                                operation = call.operation.as_str();
                                "delivered");
                }
                Ok(false) => {
                    log::trace!(target: "beacon",
                                destination = adapter.name(),
                                operation = call.operation.as_str();
                                "destination does not handle operation, skipping");
                }
                Err(_) => {
                    log::warn!(target: "beacon",
                               destination = adapter.name(),
                               operation = call.operation.as_str();
                               "destination handler panicked, continuing fan-out");
                }
            }
        }

        if let Some(callback) = callback {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::{CallOptions, Dispatcher};
    use crate::adapter::Adapter;
    use crate::page_context::StaticPageMetadata;
    use crate::ready::ReadinessGate;
    use crate::registry::AdapterRegistry;
    use crate::{Properties, PropertyValue};

    fn recording_adapter(name: &str, present: bool, calls: &Arc<Mutex<Vec<String>>>) -> Adapter {
        let calls = calls.clone();
        let tag = name.to_owned();
        Adapter::builder(name)
            .probe(move || present)
            .track(move |event_name, _properties| {
                calls.lock().unwrap().push(format!("{tag}:{event_name}"));
            })
            .build()
    }

    fn dispatcher(registry: AdapterRegistry) -> Dispatcher {
        let _ = env_logger::builder().is_test(true).try_init();
        Dispatcher::new(registry, Arc::new(ReadinessGate::new()), None)
    }

    #[test]
    fn fans_out_in_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AdapterRegistry::new();
        registry.register(recording_adapter("a", true, &calls));
        registry.register(recording_adapter("b", true, &calls));

        dispatcher(registry).track("signup", None, &CallOptions::new(), None);

        assert_eq!(*calls.lock().unwrap(), ["a:signup", "b:signup"]);
    }

    #[test]
    fn failing_probe_skips_destination() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AdapterRegistry::new();
        registry.register(recording_adapter("a", true, &calls));
        registry.register(recording_adapter("b", false, &calls));

        let properties: Properties = [("plan".to_owned(), "pro".into())].into_iter().collect();
        dispatcher(registry).track("signup", Some(&properties), &CallOptions::new(), None);

        assert_eq!(*calls.lock().unwrap(), ["a:signup"]);
    }

    #[test]
    fn disabled_adapter_is_skipped_even_when_present() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AdapterRegistry::new();
        {
            let calls = calls.clone();
            registry.register(
                Adapter::builder("off")
                    .enabled(false)
                    .probe(|| true)
                    .track(move |event_name, _properties| {
                        calls.lock().unwrap().push(event_name.to_owned());
                    })
                    .build(),
            );
        }

        dispatcher(registry).track("signup", None, &CallOptions::new(), None);

        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_handler_skips_destination_without_error() {
        // Present, enabled, passing probe, but no identify handler.
        let mut registry = AdapterRegistry::new();
        registry.register(
            Adapter::builder("track-only")
                .probe(|| true)
                .track(|_event_name, _properties| {})
                .build(),
        );

        let completed = Arc::new(AtomicUsize::new(0));
        let callback = {
            let completed = completed.clone();
            Box::new(move || {
                completed.fetch_add(1, Ordering::SeqCst);
            })
        };

        let traits: Properties = [("name".to_owned(), "Ada".into())].into_iter().collect();
        dispatcher(registry).identify("u1", Some(&traits), &CallOptions::new(), Some(callback));

        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_registry_still_invokes_completion_callback() {
        let completed = Arc::new(AtomicUsize::new(0));
        let callback = {
            let completed = completed.clone();
            Box::new(move || {
                completed.fetch_add(1, Ordering::SeqCst);
            })
        };

        dispatcher(AdapterRegistry::new()).track("signup", None, &CallOptions::new(), Some(callback));

        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_handler_does_not_abort_fan_out() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AdapterRegistry::new();
        registry.register(
            Adapter::builder("faulty")
                .probe(|| true)
                .track(|_event_name, _properties| panic!("destination blew up"))
                .build(),
        );
        registry.register(recording_adapter("healthy", true, &calls));

        let completed = Arc::new(AtomicUsize::new(0));
        let callback = {
            let completed = completed.clone();
            Box::new(move || {
                completed.fetch_add(1, Ordering::SeqCst);
            })
        };

        dispatcher(registry).track("signup", None, &CallOptions::new(), Some(callback));

        assert_eq!(*calls.lock().unwrap(), ["healthy:signup"]);
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn gate_fires_before_first_fan_out_only() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let gate = Arc::new(ReadinessGate::new());
        {
            let order = order.clone();
            gate.register(move || order.lock().unwrap().push("ready".to_owned()));
        }

        let mut registry = AdapterRegistry::new();
        {
            let order = order.clone();
            registry.register(
                Adapter::builder("recorder")
                    .probe(|| true)
                    .track(move |event_name, _properties| {
                        order.lock().unwrap().push(event_name.to_owned());
                    })
                    .build(),
            );
        }

        let dispatcher = Dispatcher::new(registry, gate, None);
        dispatcher.track("first", None, &CallOptions::new(), None);
        dispatcher.track("second", None, &CallOptions::new(), None);

        assert_eq!(*order.lock().unwrap(), ["ready", "first", "second"]);
    }

    #[test]
    fn page_shifts_category_into_name_when_name_is_absent() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AdapterRegistry::new();
        {
            let seen = seen.clone();
            registry.register(
                Adapter::builder("pages")
                    .probe(|| true)
                    .page(move |category, name, _properties| {
                        seen.lock()
                            .unwrap()
                            .push((category.map(str::to_owned), name.map(str::to_owned)));
                    })
                    .build(),
            );
        }

        let dispatcher = dispatcher(registry);
        dispatcher.page(Some("Docs"), None, None, &CallOptions::new(), None);
        dispatcher.page(Some("Docs"), Some("Intro"), None, &CallOptions::new(), None);

        assert_eq!(
            *seen.lock().unwrap(),
            [
                (None, Some("Docs".to_owned())),
                (Some("Docs".to_owned()), Some("Intro".to_owned())),
            ]
        );
    }

    #[test]
    fn page_merges_context_under_caller_properties() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AdapterRegistry::new();
        {
            let seen = seen.clone();
            registry.register(
                Adapter::builder("pages")
                    .probe(|| true)
                    .page(move |_category, _name, properties| {
                        seen.lock().unwrap().push(properties.clone());
                    })
                    .build(),
            );
        }

        let metadata = StaticPageMetadata::new()
            .with_current_url("https://example.com/docs/intro")
            .unwrap()
            .with_title("Beacon Docs")
            .with_referrer("https://example.com/");
        let dispatcher = Dispatcher::new(
            registry,
            Arc::new(ReadinessGate::new()),
            Some(Box::new(metadata)),
        );

        let caller: Properties = [("title".to_owned(), "Custom".into())].into_iter().collect();
        dispatcher.page(
            Some("Docs"),
            Some("Intro"),
            Some(&caller),
            &CallOptions::new(),
            None,
        );

        let seen = seen.lock().unwrap();
        let properties = &seen[0];
        assert_eq!(
            properties.get("title"),
            Some(&PropertyValue::String("Custom".to_owned()))
        );
        assert_eq!(
            properties.get("url"),
            Some(&PropertyValue::String(
                "https://example.com/docs/intro".to_owned()
            ))
        );
        assert_eq!(
            properties.get("path"),
            Some(&PropertyValue::String("/docs/intro".to_owned()))
        );
        assert_eq!(
            properties.get("referrer"),
            Some(&PropertyValue::String("https://example.com/".to_owned()))
        );
    }
}
