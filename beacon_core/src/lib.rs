//! `beacon_core` is the building-block library behind the Beacon SDK. If you're integrating
//! analytics into an application, you probably want the `beacon` crate instead.
//!
//! # Overview
//!
//! `beacon_core` is organized as a set of building blocks that compose into a client-side
//! analytics fan-out layer. The SDK crate wires them together; embedders with unusual needs can
//! assemble them differently.
//!
//! [`Adapter`](adapter::Adapter) is a self-contained capability record for one destination: an
//! enable flag, an availability probe, and a typed handler slot per operation. The [`adapters`]
//! module ships descriptors for a set of common destinations, each built around a small trait
//! standing in for that destination's library, plus a blank template for custom slots.
//!
//! [`AdapterRegistry`](registry::AdapterRegistry) is an ordered collection of adapters keyed by
//! destination name. It owns no behavior beyond storage and iteration order; fan-out order is
//! registration order.
//!
//! [`ReadinessGate`](ready::ReadinessGate) holds at most one pending "ready" callback and
//! guarantees it runs exactly once, either just before the first dispatched operation or when
//! the fallback [`ReadyTimer`](ready::ReadyTimer) expires, whichever comes first.
//!
//! [`PageContext`](page_context::PageContext) captures ambient page metadata (url, title,
//! referrer, path) from an injected [`PageMetadata`](page_context::PageMetadata) provider and is
//! merged as defaults under the caller-supplied properties of `page` calls.
//!
//! [`Dispatcher`](dispatch::Dispatcher) is the operation surface: for each call it triggers the
//! readiness gate, normalizes and enriches arguments, iterates the registry, filters each
//! adapter by enable flag, probe, and handler presence, and invokes the matching handler behind
//! a per-destination unwind boundary.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapter;
pub mod adapters;
pub mod dispatch;
pub mod page_context;
pub mod ready;
pub mod registry;

mod error;
mod properties;

pub use error::{Error, Result};
pub use properties::{Properties, PropertyValue};
