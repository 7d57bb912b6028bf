//! # satel-adapter-host-memory
//!
//! In-process stand-in for the host framework services the binding talks to.
//!
//! ## Provided ports
//!
//! | Port | Implementation | Behaviour |
//! |------|----------------|-----------|
//! | `ServiceRegistry` | [`InMemoryServiceRegistry`] | Keeps published discovery services in a map until their handle is released |
//! | `ThingTypeProvider` | [`StaticThingTypeProvider`] | Serves labels for the Satel thing-type catalog |
//!
//! ## Dependency rule
//!
//! Depends on `satel-app` (port traits) and `satel-domain` only.

mod registry;
mod thing_types;

pub use registry::InMemoryServiceRegistry;
pub use thing_types::StaticThingTypeProvider;
