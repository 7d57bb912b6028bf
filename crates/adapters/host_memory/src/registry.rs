//! Service registry keeping discovery services in memory.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use satel_app::discovery::DeviceDiscoveryService;
use satel_app::ports::{RegistryError, ServiceRegistration, ServiceRegistry};

type Services = Mutex<BTreeMap<u64, DeviceDiscoveryService>>;

fn lock(services: &Services) -> MutexGuard<'_, BTreeMap<u64, DeviceDiscoveryService>> {
    services.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry holding every published discovery service, in registration
/// order. Cheap to clone; clones share the same services.
#[derive(Clone, Default)]
pub struct InMemoryServiceRegistry {
    services: Arc<Services>,
    next_id: Arc<AtomicU64>,
    closed: Arc<AtomicBool>,
}

impl InMemoryServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the currently published services.
    #[must_use]
    pub fn services(&self) -> Vec<DeviceDiscoveryService> {
        lock(&self.services).values().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.services).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.services).is_empty()
    }

    /// Refuse further registrations. Already published services stay until
    /// their handles are released.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl ServiceRegistry for InMemoryServiceRegistry {
    fn register_discovery_service(
        &self,
        service: DeviceDiscoveryService,
    ) -> Result<Box<dyn ServiceRegistration>, RegistryError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(RegistryError::Closed);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(service_id = id, bridge = %service.bridge_uid(), "service published");
        lock(&self.services).insert(id, service);
        Ok(Box::new(InMemoryRegistration {
            id,
            services: Arc::clone(&self.services),
        }))
    }
}

struct InMemoryRegistration {
    id: u64,
    services: Arc<Services>,
}

impl ServiceRegistration for InMemoryRegistration {
    fn unregister(self: Box<Self>) {
        if lock(&self.services).remove(&self.id).is_some() {
            tracing::debug!(service_id = self.id, "service withdrawn");
        }
    }
}
