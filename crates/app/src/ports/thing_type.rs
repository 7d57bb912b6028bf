//! Thing-type descriptor lookup, delegated to the host.

use satel_domain::uid::ThingTypeUid;

/// Host-side descriptor of a thing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingType {
    pub uid: ThingTypeUid,
    /// Human-readable name shown for things of this type.
    pub label: String,
}

/// Resolves thing-type descriptors.
pub trait ThingTypeProvider: Send + Sync {
    fn thing_type(&self, uid: &ThingTypeUid) -> Option<ThingType>;
}
