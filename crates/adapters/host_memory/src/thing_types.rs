//! Labels for the Satel thing-type catalog.

use std::collections::HashMap;

use satel_app::ports::{ThingType, ThingTypeProvider};
use satel_domain::thing_type::ThingKind;
use satel_domain::uid::ThingTypeUid;

fn label(kind: ThingKind) -> &'static str {
    match kind {
        ThingKind::Ethm1 => "ETHM-1 bridge",
        ThingKind::IntRs => "INT-RS bridge",
        ThingKind::Partition => "Partition",
        ThingKind::Zone => "Zone",
        ThingKind::Output => "Output",
        ThingKind::Shutter => "Roller shutter",
        ThingKind::Atd100 => "ATD-100",
        ThingKind::System => "System",
        ThingKind::EventLog => "Event log",
    }
}

/// Serves a descriptor for every [`ThingKind`].
pub struct StaticThingTypeProvider {
    types: HashMap<ThingTypeUid, ThingType>,
}

impl Default for StaticThingTypeProvider {
    fn default() -> Self {
        let types = ThingKind::ALL
            .into_iter()
            .map(|kind| {
                let thing_type = ThingType {
                    uid: kind.type_uid(),
                    label: label(kind).to_string(),
                };
                (kind.type_uid(), thing_type)
            })
            .collect();

        Self { types }
    }
}

impl ThingTypeProvider for StaticThingTypeProvider {
    fn thing_type(&self, uid: &ThingTypeUid) -> Option<ThingType> {
        self.types.get(uid).cloned()
    }
}
