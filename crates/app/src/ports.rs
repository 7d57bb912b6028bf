//! Port definitions — traits the host side implements.
//!
//! Ports are the boundaries between the binding and the host framework.
//! They are defined here (in `app`) so that both the factory and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod serial;
pub mod service_registry;
pub mod thing_type;

pub use serial::{SerialPortIdentifier, SerialPortManager};
pub use service_registry::{RegistryError, ServiceRegistration, ServiceRegistry};
pub use thing_type::{ThingType, ThingTypeProvider};
