//! Adapter for the Segment analytics library.
//!
//! Segment is the only built-in destination that handles all five operations.

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::Properties;

/// Client surface of the Segment analytics library.
pub trait SegmentSdk: Send + Sync {
    /// Whether the library has loaded its integrations.
    fn is_loaded(&self) -> bool;

    fn identify(&self, user_id: &str, traits: Option<&Properties>);
    fn track(&self, event_name: &str, properties: Option<&Properties>);
    fn page(&self, category: Option<&str>, name: &str, properties: &Properties);
    fn alias(&self, user_id: &str, previous_id: &str);
    fn group(&self, group_id: &str, traits: Option<&Properties>);
}

/// Build the Segment adapter descriptor around `sdk`.
pub fn adapter(sdk: Arc<dyn SegmentSdk>) -> Adapter {
    Adapter::builder("segment")
        .probe({
            let sdk = Arc::clone(&sdk);
            move || sdk.is_loaded()
        })
        .identify({
            let sdk = Arc::clone(&sdk);
            move |user_id, traits| {
                if !user_id.is_empty() {
                    sdk.identify(user_id, traits);
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
        .page({
            let sdk = Arc::clone(&sdk);
            move |category, name, properties| {
                // Segment requires a page name; a category alone is not sent.
                if let Some(name) = name {
                    sdk.page(category, name, properties);
                }
            }
        })
        .alias({
            let sdk = Arc::clone(&sdk);
            move |user_id, previous_id| {
                if !user_id.is_empty() && !previous_id.is_empty() {
                    sdk.alias(user_id, previous_id);
                }
            }
        })
        .group({
            let sdk = Arc::clone(&sdk);
            move |group_id, traits| {
                if !group_id.is_empty() {
                    sdk.group(group_id, traits);
                }
            }
        })
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use super::{adapter, SegmentSdk};
    use crate::adapter::Operation;
    use crate::Properties;

    #[derive(Default)]
    struct RecordingSegment {
        loaded: AtomicBool,
        calls: Mutex<Vec<String>>,
    }

    impl SegmentSdk for RecordingSegment {
        fn is_loaded(&self) -> bool {
            self.loaded.load(Ordering::SeqCst)
        }

        fn identify(&self, user_id: &str, _traits: Option<&Properties>) {
            self.calls.lock().unwrap().push(format!("identify:{user_id}"));
        }

        fn track(&self, event_name: &str, _properties: Option<&Properties>) {
            self.calls.lock().unwrap().push(format!("track:{event_name}"));
        }

        fn page(&self, category: Option<&str>, name: &str, _properties: &Properties) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("page:{}:{name}", category.unwrap_or("-")));
        }

        fn alias(&self, user_id: &str, previous_id: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("alias:{user_id}:{previous_id}"));
        }

        fn group(&self, group_id: &str, _traits: Option<&Properties>) {
            self.calls.lock().unwrap().push(format!("group:{group_id}"));
        }
    }

    #[test]
    fn handles_all_five_operations() {
        let sdk = Arc::new(RecordingSegment::default());
        let adapter = adapter(sdk);

        for operation in [
            Operation::Identify,
            Operation::Track,
            Operation::Page,
            Operation::Group,
            Operation::Alias,
        ] {
            assert!(adapter.supports(operation), "{operation} should be handled");
        }
    }

    #[test]
    fn probe_tracks_load_state() {
        let sdk = Arc::new(RecordingSegment::default());
        let adapter = adapter(sdk.clone());

        assert!(!adapter.probe());
        sdk.loaded.store(true, Ordering::SeqCst);
        assert!(adapter.probe());
    }

    #[test]
    fn guards_suppress_calls_with_missing_required_fields() {
        let sdk = Arc::new(RecordingSegment::default());
        let adapter = adapter(sdk.clone());
        let handlers = adapter.handlers();

        handlers.identify.as_ref().unwrap()("", None);
        handlers.track.as_ref().unwrap()("", None);
        handlers.page.as_ref().unwrap()(Some("Docs"), None, &Properties::new());
        handlers.alias.as_ref().unwrap()("u1", "");
        handlers.group.as_ref().unwrap()("", None);

        assert!(sdk.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn forwards_well_formed_calls() {
        let sdk = Arc::new(RecordingSegment::default());
        let adapter = adapter(sdk.clone());
        let handlers = adapter.handlers();

        handlers.identify.as_ref().unwrap()("u1", None);
        handlers.page.as_ref().unwrap()(None, Some("Intro"), &Properties::new());
        handlers.alias.as_ref().unwrap()("u1", "anon-7");

        assert_eq!(
            *sdk.calls.lock().unwrap(),
            ["identify:u1", "page:-:Intro", "alias:u1:anon-7"]
        );
    }
}
