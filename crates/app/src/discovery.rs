//! Per-bridge discovery service.
//!
//! A [`DeviceDiscoveryService`] is created for every bridge handler and
//! published through the [`ServiceRegistry`](crate::ports::ServiceRegistry)
//! port. Scanning reports the per-bridge virtual things; panel-side devices
//! (zones, outputs, partitions) are enumerated by the bridge protocol, which
//! this crate does not implement.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use satel_domain::error::UidError;
use satel_domain::thing_type::{DEVICE_THING_TYPES, ThingCategory, ThingKind, VIRTUAL_THING_TYPES};
use satel_domain::uid::{ThingTypeUid, ThingUid};

use crate::handler::SatelBridge;
use crate::ports::ThingType;
use crate::resolver::virtual_thing_uid;

/// Callback resolving thing-type descriptors through the host.
pub type ThingTypeLookup = Arc<dyn Fn(&ThingTypeUid) -> Option<ThingType> + Send + Sync>;

/// A thing found under a bridge, proposed to the host's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryResult {
    pub thing_uid: ThingUid,
    pub thing_type_uid: ThingTypeUid,
    pub bridge_uid: ThingUid,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

/// Discovery helper bound to one bridge handler.
#[derive(Clone)]
pub struct DeviceDiscoveryService {
    bridge: Arc<dyn SatelBridge>,
    thing_types: ThingTypeLookup,
}

impl DeviceDiscoveryService {
    #[must_use]
    pub fn new(bridge: Arc<dyn SatelBridge>, thing_types: ThingTypeLookup) -> Self {
        Self {
            bridge,
            thing_types,
        }
    }

    /// The bridge this service scans.
    #[must_use]
    pub fn bridge_uid(&self) -> &ThingUid {
        &self.bridge.thing().uid
    }

    /// Thing types this service may report: devices and virtual things.
    #[must_use]
    pub fn supported_thing_types(&self) -> Vec<ThingTypeUid> {
        let mut types: Vec<_> = DEVICE_THING_TYPES
            .iter()
            .chain(VIRTUAL_THING_TYPES.iter())
            .cloned()
            .collect();
        types.sort();
        types
    }

    /// Run a scan and return everything found under the bridge.
    ///
    /// # Errors
    ///
    /// Returns [`UidError`] if the bridge id cannot scope a child uid.
    pub fn start_scan(&self) -> Result<Vec<DiscoveryResult>, UidError> {
        let bridge_uid = self.bridge_uid().clone();
        let timestamp = Utc::now();
        let results = ThingKind::ALL
            .into_iter()
            .filter(|kind| kind.category() == ThingCategory::Virtual)
            .map(|kind| {
                let thing_type_uid = kind.type_uid();
                let thing_uid = virtual_thing_uid(&thing_type_uid, &bridge_uid)?;
                Ok(DiscoveryResult {
                    label: self.label_for(&thing_type_uid),
                    thing_uid,
                    thing_type_uid,
                    bridge_uid: bridge_uid.clone(),
                    timestamp,
                })
            })
            .collect::<Result<Vec<_>, UidError>>()?;
        tracing::debug!(bridge = %bridge_uid, found = results.len(), "discovery scan finished");
        Ok(results)
    }

    fn label_for(&self, thing_type_uid: &ThingTypeUid) -> String {
        (self.thing_types)(thing_type_uid)
            .map_or_else(|| thing_type_uid.id().to_string(), |thing_type| thing_type.label)
    }
}

impl fmt::Debug for DeviceDiscoveryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDiscoveryService")
            .field("bridge", &self.bridge_uid().to_string())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Ethm1BridgeHandler;
    use satel_domain::configuration::Configuration;
    use satel_domain::thing::Thing;

    fn bridge() -> Arc<dyn SatelBridge> {
        let kind = ThingKind::Ethm1;
        let uid = ThingUid::new(&kind.type_uid(), "home", &[]).unwrap();
        Arc::new(Ethm1BridgeHandler::new(Thing::new(
            uid,
            kind.type_uid(),
            Configuration::new(),
        )))
    }

    fn labelled() -> ThingTypeLookup {
        Arc::new(|uid: &ThingTypeUid| {
            (uid.id() == "system").then(|| ThingType {
                uid: uid.clone(),
                label: "System".to_string(),
            })
        })
    }

    #[test]
    fn should_report_devices_and_virtual_types_as_supported() {
        let service = DeviceDiscoveryService::new(bridge(), labelled());
        let types = service.supported_thing_types();
        assert_eq!(types.len(), 7);
        assert!(types.contains(&ThingKind::Zone.type_uid()));
        assert!(types.contains(&ThingKind::EventLog.type_uid()));
        assert!(!types.contains(&ThingKind::Ethm1.type_uid()));
    }

    #[test]
    fn should_discover_virtual_things_scoped_by_bridge() {
        let service = DeviceDiscoveryService::new(bridge(), labelled());
        let results = service.start_scan().unwrap();

        let uids: Vec<String> = results.iter().map(|r| r.thing_uid.to_string()).collect();
        assert_eq!(uids, ["satel:system:home", "satel:event-log:home"]);
        assert!(results.iter().all(|r| r.bridge_uid.to_string() == "satel:ethm-1:home"));
    }

    #[test]
    fn should_label_results_from_thing_type_lookup() {
        let service = DeviceDiscoveryService::new(bridge(), labelled());
        let results = service.start_scan().unwrap();
        assert_eq!(results[0].label, "System");
        // No descriptor for event-log: fall back to the type id.
        assert_eq!(results[1].label, "event-log");
    }
}
