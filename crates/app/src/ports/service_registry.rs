//! Service registry port — where discovery services are published.

use crate::discovery::DeviceDiscoveryService;

/// Errors raised by a host service registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry no longer accepts services (host shutting down).
    #[error("service registry is closed")]
    Closed,

    /// Host-specific failure.
    #[error("service registration failed")]
    Host(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Handle to a published service. Dropping the box without calling
/// [`unregister`](Self::unregister) leaves the service published.
pub trait ServiceRegistration: Send + Sync {
    /// Withdraw the service from the host. Consumes the handle so it can only
    /// happen once.
    fn unregister(self: Box<Self>);
}

/// Host registry accepting discovery services.
pub trait ServiceRegistry: Send + Sync {
    /// Publish a discovery service, returning the handle that withdraws it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the host refuses the registration.
    fn register_discovery_service(
        &self,
        service: DeviceDiscoveryService,
    ) -> Result<Box<dyn ServiceRegistration>, RegistryError>;
}
