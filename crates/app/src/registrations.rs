//! Discovery-service registrations, one per live bridge handler.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use satel_domain::uid::ThingUid;

use crate::discovery::{DeviceDiscoveryService, ThingTypeLookup};
use crate::handler::SatelBridge;
use crate::ports::{RegistryError, ServiceRegistration, ServiceRegistry};

/// Table of open discovery-service registrations keyed by bridge uid.
///
/// Holds at most one live handle per uid: registering again for the same
/// bridge withdraws the previous service first.
///
/// The table lock is held while the registry publishes a service, so a
/// concurrent [`unregister`](Self::unregister) of the same uid either sees
/// the new handle or runs before it exists. Hosts sequence creation and
/// removal of one thing; the registry must not call back into this table.
pub struct DiscoveryRegistrations<R> {
    registry: R,
    entries: Mutex<HashMap<ThingUid, Box<dyn ServiceRegistration>>>,
}

impl<R: ServiceRegistry> DiscoveryRegistrations<R> {
    /// Create an empty table publishing through `registry`.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Publish a discovery service for `bridge` and remember its handle.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the host refuses the service; the table
    /// is left untouched in that case.
    #[tracing::instrument(skip_all, fields(bridge = %bridge.thing().uid))]
    pub fn register(
        &self,
        bridge: Arc<dyn SatelBridge>,
        thing_types: ThingTypeLookup,
    ) -> Result<(), RegistryError> {
        let uid = bridge.thing().uid.clone();
        let service = DeviceDiscoveryService::new(bridge, thing_types);
        let previous = {
            let mut entries = self.lock_entries();
            let registration = self.registry.register_discovery_service(service)?;
            entries.insert(uid, registration)
        };
        if let Some(previous) = previous {
            tracing::warn!("replacing a live discovery registration");
            previous.unregister();
        }
        tracing::debug!("discovery service registered");
        Ok(())
    }

    /// Withdraw the service registered for `uid`. Unknown uids are ignored.
    ///
    /// Returns whether a registration was released.
    pub fn unregister(&self, uid: &ThingUid) -> bool {
        let removed = self.lock_entries().remove(uid);
        match removed {
            Some(registration) => {
                registration.unregister();
                tracing::debug!(bridge = %uid, "discovery service unregistered");
                true
            }
            None => false,
        }
    }

    /// Withdraw every registration.
    pub fn clear(&self) {
        let drained: Vec<_> = self.lock_entries().drain().collect();
        for (uid, registration) in drained {
            registration.unregister();
            tracing::debug!(bridge = %uid, "discovery service unregistered");
        }
    }

    #[must_use]
    pub fn contains(&self, uid: &ThingUid) -> bool {
        self.lock_entries().contains_key(uid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<ThingUid, Box<dyn ServiceRegistration>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
