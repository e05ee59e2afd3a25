//! Adapter for the Amplitude library.

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::Properties;

/// Client surface of the Amplitude library's default instance.
pub trait AmplitudeSdk: Send + Sync {
    /// Whether the default instance has been initialized with options.
    fn is_initialized(&self) -> bool;

    fn set_user_id(&self, user_id: &str);
    fn set_user_properties(&self, properties: &Properties);
    fn log_event(&self, event_name: &str, properties: Option<&Properties>);
}

/// Build the Amplitude adapter descriptor around `sdk`.
pub fn adapter(sdk: Arc<dyn AmplitudeSdk>) -> Adapter {
    Adapter::builder("amplitude")
        .probe({
            let sdk = Arc::clone(&sdk);
            move || sdk.is_initialized()
        })
        .identify({
            let sdk = Arc::clone(&sdk);
            move |user_id, traits| {
                if !user_id.is_empty() {
                    sdk.set_user_id(user_id);
                }
                if let Some(traits) = traits {
                    sdk.set_user_properties(traits);
                }
            }
        })
        .track({
            let sdk = Arc::clone(&sdk);
            move |event_name, properties| {
                if !event_name.is_empty() {
                    sdk.log_event(event_name, properties);
                }
            }
        })
        .build()
}
