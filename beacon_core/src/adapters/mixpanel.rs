//! Adapter for the Mixpanel library.

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::Properties;

/// Client surface of the Mixpanel library.
pub trait MixpanelSdk: Send + Sync {
    /// Whether the library has finished loading.
    fn is_loaded(&self) -> bool;

    /// Bind future events to `distinct_id`.
    fn identify(&self, distinct_id: &str);

    /// Set profile properties on the identified user.
    fn people_set(&self, properties: &Properties);

    fn track(&self, event_name: &str, properties: Option<&Properties>);
}

/// Build the Mixpanel adapter descriptor around `sdk`.
///
/// Mixpanel splits identity into two calls: the distinct id is bound first, then user traits are
/// set as profile properties. Either half is skipped when its input is missing.
pub fn adapter(sdk: Arc<dyn MixpanelSdk>) -> Adapter {
    Adapter::builder("mixpanel")
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
                    sdk.people_set(traits);
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

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{adapter, MixpanelSdk};
    use crate::adapter::Operation;
    use crate::Properties;

    #[derive(Default)]
    struct RecordingMixpanel {
        calls: Mutex<Vec<String>>,
    }

    impl MixpanelSdk for RecordingMixpanel {
        fn is_loaded(&self) -> bool {
            true
        }

        fn identify(&self, distinct_id: &str) {
            self.calls.lock().unwrap().push(format!("identify:{distinct_id}"));
        }

        fn people_set(&self, properties: &Properties) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("people_set:{}", properties.len()));
        }

        fn track(&self, event_name: &str, _properties: Option<&Properties>) {
            self.calls.lock().unwrap().push(format!("track:{event_name}"));
        }
    }

    #[test]
    fn identify_binds_id_then_sets_profile() {
        let sdk = Arc::new(RecordingMixpanel::default());
        let adapter = adapter(sdk.clone());

        let traits: Properties = [("name".to_owned(), "Ada".into())].into_iter().collect();
        adapter.handlers().identify.as_ref().unwrap()("u1", Some(&traits));

        assert_eq!(*sdk.calls.lock().unwrap(), ["identify:u1", "people_set:1"]);
    }

    #[test]
    fn traits_are_set_even_without_a_user_id() {
        let sdk = Arc::new(RecordingMixpanel::default());
        let adapter = adapter(sdk.clone());

        let traits: Properties = [("plan".to_owned(), "pro".into())].into_iter().collect();
        adapter.handlers().identify.as_ref().unwrap()("", Some(&traits));

        assert_eq!(*sdk.calls.lock().unwrap(), ["people_set:1"]);
    }

    #[test]
    fn only_identify_and_track_are_handled() {
        let sdk = Arc::new(RecordingMixpanel::default());
        let adapter = adapter(sdk);

        assert!(adapter.supports(Operation::Identify));
        assert!(adapter.supports(Operation::Track));
        assert!(!adapter.supports(Operation::Page));
        assert!(!adapter.supports(Operation::Group));
        assert!(!adapter.supports(Operation::Alias));
    }
}
