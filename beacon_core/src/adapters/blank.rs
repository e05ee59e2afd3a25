//! Blank adapter template.
//!
//! Copy this module as the starting point for a custom destination: define the trait your
//! destination library exposes, fill in the probe and the handlers for the operations it
//! supports, and flip `enabled` once it is wired up. Disabled is the safe default for unused
//! slots — a disabled adapter is never invoked, regardless of what its probe reports.

use crate::adapter::Adapter;

/// Build a disabled, do-nothing adapter named `name`.
///
/// Every handler slot is filled with a no-op so the template shows the full operation surface.
pub fn adapter(name: impl Into<String>) -> Adapter {
    Adapter::builder(name)
        .enabled(false)
        .probe(|| false)
        .identify(|_user_id, _traits| {})
        .track(|_event_name, _properties| {})
        .page(|_category, _name, _properties| {})
        .group(|_group_id, _traits| {})
        .alias(|_user_id, _previous_id| {})
        .build()
}
