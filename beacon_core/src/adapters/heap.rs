//! Adapter for the Heap library.

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::Properties;

/// Client surface of the Heap library.
pub trait HeapSdk: Send + Sync {
    /// Whether the library is present with its track entry point installed.
    fn is_loaded(&self) -> bool;

    fn identify(&self, user_id: &str);
    fn add_user_properties(&self, properties: &Properties);
    fn track(&self, event_name: &str, properties: Option<&Properties>);
}

/// Build the Heap adapter descriptor around `sdk`.
pub fn adapter(sdk: Arc<dyn HeapSdk>) -> Adapter {
    Adapter::builder("heap")
        .probe({
            let sdk = Arc::clone(&sdk);
            move || sdk.is_loaded()
        })
        .identify({
            let sdk = Arc::clone(&sdk);
            move |user_id, traits| {
                if !user_id.is_empty() {
                    sdk.identify(user_id);
                }
                if let Some(traits) = traits {
                    sdk.add_user_properties(traits);
                }
            }
        })
        .track({
            let sdk = Arc::clone(&sdk);
            move |event_name, properties| {
                if !event_name.is_empty() {
                    sdk.track(event_name, properties);
                }
            }
        })
        .build()
}
