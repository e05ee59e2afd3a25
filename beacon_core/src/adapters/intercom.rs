//! Adapter for the Intercom messenger.

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::Properties;

/// Client surface of the Intercom messenger.
pub trait IntercomSdk: Send + Sync {
    /// Identifier of the current visitor. `None` until the messenger has booted.
    fn visitor_id(&self) -> Option<String>;

    /// Update the current visitor with `properties`.
    fn update(&self, properties: &Properties);

    fn track_event(&self, event_name: &str, properties: Option<&Properties>);
}

/// Build the Intercom adapter descriptor around `sdk`.
///
/// Intercom has no dedicated identify call; identity and traits are both folded into visitor
/// updates. The user id is sent as the `user_id` property.
pub fn adapter(sdk: Arc<dyn IntercomSdk>) -> Adapter {
    Adapter::builder("intercom")
        .probe({
            let sdk = Arc::clone(&sdk);
            move || sdk.visitor_id().is_some()
        })
        .identify({
            let sdk = Arc::clone(&sdk);
            move |user_id, traits| {
                if !user_id.is_empty() {
                    let identity: Properties =
                        [("user_id".to_owned(), user_id.into())].into_iter().collect();
                    sdk.update(&identity);
                }
                if let Some(traits) = traits {
                    sdk.update(traits);
                }
            }
        })
        .track({
            let sdk = Arc::clone(&sdk);
            move |event_name, properties| {
                if !event_name.is_empty() {
                    sdk.track_event(event_name, properties);
                }
            }
        })
        .build()
}
