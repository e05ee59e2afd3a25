//! Built-in destination adapters.
//!
//! Each module defines the client surface this SDK expects from one third-party destination
//! library, plus an `adapter` constructor wiring that surface into an
//! [`Adapter`](crate::adapter::Adapter) descriptor. The destination library itself stays a black
//! box: it is handed in as a shared handle, and the adapter probes it fresh on every dispatch to
//! decide whether it is present and initialized.
//!
//! Destinations differ in which operations they handle and in how strictly they guard their
//! inputs; each adapter reproduces its destination's own rules. Start from [`blank`] when wiring
//! up a destination that is not covered here.

pub mod amplitude;
pub mod blank;
pub mod google_analytics;
pub mod heap;
pub mod intercom;
pub mod keen;
pub mod mixpanel;
pub mod segment;
