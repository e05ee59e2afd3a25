//! Adapter for the Keen event recording library.

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::Properties;

/// Client surface of a constructed Keen client.
pub trait KeenSdk: Send + Sync {
    /// Whether the library has loaded and a client has been constructed.
    fn is_loaded(&self) -> bool;

    /// Extend every future recorded event with `properties`.
    fn extend_events(&self, properties: &Properties);

    /// Record a single event into `collection`.
    fn record_event(&self, collection: &str, properties: Option<&Properties>);
}

/// Build the Keen adapter descriptor around `sdk`.
///
/// Keen has no identity model of its own; the user id and traits are folded into the global
/// event extensions, and each tracked event becomes a collection named after the event.
pub fn adapter(sdk: Arc<dyn KeenSdk>) -> Adapter {
    Adapter::builder("keen")
        .probe({
            let sdk = Arc::clone(&sdk);
            move || sdk.is_loaded()
        })
        .identify({
            let sdk = Arc::clone(&sdk);
            move |user_id, traits| {
                if !user_id.is_empty() {
                    let identity: Properties =
                        [("user_id".to_owned(), user_id.into())].into_iter().collect();
                    sdk.extend_events(&identity);
                }
                if let Some(traits) = traits {
                    sdk.extend_events(traits);
                }
            }
        })
        .track({
            let sdk = Arc::clone(&sdk);
            move |event_name, properties| {
                if !event_name.is_empty() {
                    sdk.record_event(event_name, properties);
                }
            }
        })
        .build()
}
