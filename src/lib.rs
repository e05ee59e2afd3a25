//! The Rust SDK for Beacon, a client-side fan-out layer that broadcasts analytics operations to
//! every third-party destination present at runtime.
//!
//! # Overview
//!
//! The SDK revolves around a [`Client`] that fans a small set of analytics operations —
//! [`identify`](Client::identify), [`track`](Client::track), [`page`](Client::page),
//! [`group`](Client::group), and [`alias`](Client::alias) — out to an arbitrary number of
//! independently-loaded destinations. The caller never needs to know which destinations are
//! present, loaded, or capable of handling a given operation: each registered
//! [`Adapter`] carries its own availability probe and per-operation handlers, and the client
//! filters every call through them.
//!
//! # Destinations
//!
//! Built-in adapters for common destinations live in [`adapters`]; each is constructed around a
//! handle to that destination's library. Custom destinations are plugged in with
//! [`Adapter::builder`], and [`adapters::blank`] is the documented template for slots that are
//! not wired up yet.
//!
//! ```
//! # use beacon::{Adapter, ClientConfig};
//! let client = ClientConfig::new()
//!     .adapter(
//!         Adapter::builder("console")
//!             .probe(|| true)
//!             .track(|event_name, _properties| println!("tracked {event_name}"))
//!             .build(),
//!     )
//!     .to_client();
//!
//! client.track("signup", None);
//! ```
//!
//! # Readiness
//!
//! A callback registered with [`Client::ready`] runs exactly once: just before the first
//! dispatched operation, or after a fallback delay if no operation ever fires. Use it to defer
//! destination-specific setup (e.g., waiting for a user session) without risking that it never
//! runs.
//!
//! # Error handling
//!
//! Dispatching never returns errors. An absent destination, an operation a destination does not
//! handle, or a failing destination handler all degrade to a silent skip of that destination;
//! the remaining destinations and the completion callback still run. The [`Error`] enum covers
//! only the edges around dispatch, such as shutting down the ready timer.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for logging messages
//! under the `beacon` target. Consider integrating a `log`-compatible logger implementation for
//! better visibility into which destinations each call reaches.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod client;
mod config;

#[doc(inline)]
pub use beacon_core::{
    adapter::{Adapter, AdapterBuilder, Operation},
    adapters,
    dispatch::{CallOptions, CompletionCallback},
    page_context::{PageContext, PageMetadata, StaticPageMetadata},
    registry::AdapterRegistry,
    Error, Properties, PropertyValue, Result,
};

pub use client::Client;
pub use config::ClientConfig;
