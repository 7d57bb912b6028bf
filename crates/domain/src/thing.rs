//! Thing — a configured bridge or device instance.

use serde::{Deserialize, Serialize};

use crate::configuration::Configuration;
use crate::thing_type::ThingKind;
use crate::uid::{ThingTypeUid, ThingUid};

/// A configured bridge, device or virtual thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    pub uid: ThingUid,
    pub thing_type_uid: ThingTypeUid,
    #[serde(default)]
    pub configuration: Configuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_uid: Option<ThingUid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Thing {
    /// Create a thing without bridge or label.
    #[must_use]
    pub fn new(uid: ThingUid, thing_type_uid: ThingTypeUid, configuration: Configuration) -> Self {
        Self {
            uid,
            thing_type_uid,
            configuration,
            bridge_uid: None,
            label: None,
        }
    }

    /// Attach the owning bridge.
    #[must_use]
    pub fn with_bridge(mut self, bridge_uid: Option<ThingUid>) -> Self {
        self.bridge_uid = bridge_uid;
        self
    }

    /// Attach a human-readable label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Catalog entry for this thing's type, if it belongs to the binding.
    #[must_use]
    pub fn kind(&self) -> Option<ThingKind> {
        ThingKind::from_type_uid(&self.thing_type_uid)
    }
}
