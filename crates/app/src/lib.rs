//! # satel-app
//!
//! Application layer — the handler factory and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** the host implements (driven/outbound ports):
//!   - `ServiceRegistry` — publish and withdraw discovery services
//!   - `ThingTypeProvider` — thing-type descriptor lookup
//!   - `SerialPortManager` — serial ports available to INT-RS bridges
//! - Define the **driving/inbound** surface the host calls:
//!   - `SatelHandlerFactory` — supported types, thing creation, handler
//!     creation and removal
//! - Provide the thing handlers, the per-bridge discovery service and the
//!   registration table tying discovery services to bridge handlers
//!
//! ## Dependency rule
//! Depends on `satel-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod discovery;
pub mod factory;
pub mod handler;
pub mod ports;
pub mod registrations;
pub mod resolver;
