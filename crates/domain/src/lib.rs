//! # satel-domain
//!
//! Pure domain model for the Satel alarm-panel binding.
//!
//! ## Responsibilities
//! - Foundational types: error conventions
//! - Define the closed **thing-type catalog** (bridges, devices, virtual things)
//! - Define **thing identifiers** (`binding:type:[bridge:]id`)
//! - Define **things** and their raw **configuration**
//! - Define the typed configurations of each thing family
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod config;
pub mod configuration;
pub mod thing;
pub mod thing_type;
pub mod uid;
