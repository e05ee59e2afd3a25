//! Adapter for Google Analytics (analytics.js).

use std::sync::Arc;

use crate::adapter::Adapter;

/// Client surface of the Google Analytics default tracker.
pub trait GoogleAnalyticsSdk: Send + Sync {
    /// Whether the tracker script has loaded.
    fn is_loaded(&self) -> bool;

    /// Set the `userId` field on the tracker.
    fn set_user_id(&self, user_id: &str);

    /// Send an event hit.
    fn send_event(&self, event_category: &str, event_action: &str);
}

/// Build the Google Analytics adapter descriptor around `sdk`.
///
/// Event hits carry no free-form properties; every tracked event is sent under the catch-all
/// `"All"` category with the event name as the action.
pub fn adapter(sdk: Arc<dyn GoogleAnalyticsSdk>) -> Adapter {
    Adapter::builder("google-analytics")
        .probe({
            let sdk = Arc::clone(&sdk);
            move || sdk.is_loaded()
        })
        .identify({
            let sdk = Arc::clone(&sdk);
            move |user_id, _traits| {
                sdk.set_user_id(user_id);
            }
        })
        .track({
            let sdk = Arc::clone(&sdk);
            move |event_name, _properties| {
                sdk.send_event("All", event_name);
            }
        })
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{adapter, GoogleAnalyticsSdk};

    #[derive(Default)]
    struct RecordingGa {
        calls: Mutex<Vec<String>>,
    }

    impl GoogleAnalyticsSdk for RecordingGa {
        fn is_loaded(&self) -> bool {
            true
        }

        fn set_user_id(&self, user_id: &str) {
            self.calls.lock().unwrap().push(format!("set:{user_id}"));
        }

        fn send_event(&self, event_category: &str, event_action: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("send:{event_category}:{event_action}"));
        }
    }

    #[test]
    fn events_are_sent_under_the_all_category() {
        let sdk = Arc::new(RecordingGa::default());
        let adapter = adapter(sdk.clone());

        adapter.handlers().track.as_ref().unwrap()("signup", None);

        assert_eq!(*sdk.calls.lock().unwrap(), ["send:All:signup"]);
    }

    #[test]
    fn event_properties_are_dropped() {
        let sdk = Arc::new(RecordingGa::default());
        let adapter = adapter(sdk.clone());

        let properties = [("plan".to_owned(), "pro".into())].into_iter().collect();
        adapter.handlers().track.as_ref().unwrap()("signup", Some(&properties));

        assert_eq!(*sdk.calls.lock().unwrap(), ["send:All:signup"]);
    }
}
