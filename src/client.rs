use std::sync::Arc;

use beacon_core::dispatch::{CallOptions, CompletionCallback, Dispatcher};
use beacon_core::ready::{ReadinessGate, ReadyTimer};

use crate::{ClientConfig, Properties, Result};

/// A client fanning analytics operations out to third-party destinations.
///
/// In order to create a client instance, first create [`ClientConfig`].
///
/// Every operation runs the same way: the readiness gate is triggered, arguments are normalized
/// and enriched, and the call is broadcast to every registered adapter that is enabled, whose
/// probe reports the destination present, and that handles the operation. Fan-out is synchronous
/// and sequential in registration order; a failing destination is logged and skipped without
/// affecting the others or the caller.
///
/// # Ready timer
///
/// Constructing the client starts a background timer that fires the [`Client::ready`] callback
/// after [`ClientConfig::DEFAULT_READY_DELAY`] even if no operation is ever dispatched. Dropping
/// the client cancels the timer without firing it; use [`Client::shutdown`] to stop it cleanly.
///
/// # Examples
/// ```
/// # use beacon::{Client, ClientConfig};
/// let client = ClientConfig::new().to_client();
/// client.ready(|| println!("first event is about to go out"));
/// client.track("signup", None);
/// ```
pub struct Client {
    dispatcher: Dispatcher,
    gate: Arc<ReadinessGate>,
    ready_timer: Option<ReadyTimer>,
}

impl Client {
    /// Create a new `Client` using the specified configuration and start its ready timer.
    ///
    /// If the timer thread cannot be started, the failure is logged and the client still works:
    /// the ready callback then only fires on the first dispatched operation.
    pub fn new(config: ClientConfig) -> Client {
        let gate = Arc::new(ReadinessGate::new());

        let ready_timer = match ReadyTimer::start_with_delay(Arc::clone(&gate), config.ready_delay)
        {
            Ok(timer) => Some(timer),
            Err(err) => {
                log::warn!(target: "beacon", "failed to start ready timer: {}", err);
                None
            }
        };

        Client {
            dispatcher: Dispatcher::new(config.registry, Arc::clone(&gate), config.page_metadata),
            gate,
            ready_timer,
        }
    }

    /// Attach an identity and optional traits to the current user, broadcasting to every
    /// eligible destination.
    ///
    /// The client does not validate `user_id`; destinations individually guard against missing
    /// required fields before acting, so an empty id degrades to a per-destination no-op.
    ///
    /// # Examples
    /// ```
    /// # fn example(client: &beacon::Client) {
    /// let traits = [("name".to_owned(), "Ada".into())].into_iter().collect();
    /// client.identify("u1", Some(&traits));
    /// # }
    /// ```
    pub fn identify(&self, user_id: &str, traits: Option<&Properties>) {
        self.identify_with(user_id, traits, &CallOptions::new(), None);
    }

    /// [`Client::identify`] with reserved options and a completion callback, invoked with no
    /// arguments after fan-out.
    pub fn identify_with(
        &self,
        user_id: &str,
        traits: Option<&Properties>,
        options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.dispatcher.identify(user_id, traits, options, callback);
    }

    /// Record a named event with optional properties, broadcasting to every eligible
    /// destination.
    ///
    /// # Examples
    /// ```
    /// # fn example(client: &beacon::Client) {
    /// let properties = [("plan".to_owned(), "pro".into())].into_iter().collect();
    /// client.track("signup", Some(&properties));
    /// # }
    /// ```
    pub fn track(&self, event_name: &str, properties: Option<&Properties>) {
        self.track_with(event_name, properties, &CallOptions::new(), None);
    }

    /// [`Client::track`] with reserved options and a completion callback, invoked with no
    /// arguments after fan-out.
    pub fn track_with(
        &self,
        event_name: &str,
        properties: Option<&Properties>,
        options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.dispatcher.track(event_name, properties, options, callback);
    }

    /// Record a page view, broadcasting to every eligible destination.
    ///
    /// The category may be omitted: `page(Some("Pricing"), None, ...)` is the same call as
    /// `page(None, Some("Pricing"), ...)` — a lone positional argument is the page name.
    /// Ambient page metadata (url, title, referrer, path) from the configured
    /// [`PageMetadata`](crate::PageMetadata) provider is merged under `properties`, with the
    /// caller winning on key collision.
    ///
    /// # Examples
    /// ```
    /// # fn example(client: &beacon::Client) {
    /// client.page(Some("Docs"), Some("Intro"), None);
    /// # }
    /// ```
    pub fn page(&self, category: Option<&str>, name: Option<&str>, properties: Option<&Properties>) {
        self.page_with(category, name, properties, &CallOptions::new(), None);
    }

    /// [`Client::page`] with reserved options and a completion callback, invoked with no
    /// arguments after fan-out.
    pub fn page_with(
        &self,
        category: Option<&str>,
        name: Option<&str>,
        properties: Option<&Properties>,
        options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.dispatcher
            .page(category, name, properties, options, callback);
    }

    /// Associate the current user with a group or account, broadcasting to every eligible
    /// destination.
    pub fn group(&self, group_id: &str, traits: Option<&Properties>) {
        self.group_with(group_id, traits, &CallOptions::new(), None);
    }

    /// [`Client::group`] with reserved options and a completion callback, invoked with no
    /// arguments after fan-out.
    pub fn group_with(
        &self,
        group_id: &str,
        traits: Option<&Properties>,
        options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.dispatcher.group(group_id, traits, options, callback);
    }

    /// Link a new user id to a previously known id, broadcasting to every eligible destination.
    pub fn alias(&self, user_id: &str, previous_id: &str) {
        self.alias_with(user_id, previous_id, &CallOptions::new(), None);
    }

    /// [`Client::alias`] with reserved options and a completion callback, invoked with no
    /// arguments after fan-out.
    pub fn alias_with(
        &self,
        user_id: &str,
        previous_id: &str,
        options: &CallOptions,
        callback: Option<CompletionCallback>,
    ) {
        self.dispatcher.alias(user_id, previous_id, options, callback);
    }

    /// Register the readiness callback.
    ///
    /// The callback runs exactly once: just before the first dispatched operation, or after the
    /// ready fallback delay if no operation ever fires, whichever comes first. Registering again
    /// replaces a still-pending callback; registering after the callback has fired is a no-op.
    pub fn ready(&self, callback: impl FnOnce() + Send + 'static) {
        self.gate.register(callback);
    }

    /// Stop the ready timer and block waiting for its thread to exit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadyTimerPanicked`](crate::Error::ReadyTimerPanicked) if the timer
    /// thread has panicked.
    pub fn shutdown(self) -> Result<()> {
        if let Some(timer) = self.ready_timer {
            timer.shutdown()?;
        }
        Ok(())
    }
}
