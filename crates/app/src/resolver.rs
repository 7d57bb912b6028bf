//! Effective thing uid resolution for newly created things.

use satel_domain::config::SatelThingConfig;
use satel_domain::configuration::Configuration;
use satel_domain::error::{SatelError, UidError};
use satel_domain::thing_type::{ThingCategory, ThingKind};
use satel_domain::uid::{ThingTypeUid, ThingUid};

/// Uid of a per-bridge virtual thing: the bridge id alone.
///
/// # Errors
///
/// Returns [`UidError`] if the bridge id is not a valid segment.
pub fn virtual_thing_uid(
    thing_type_uid: &ThingTypeUid,
    bridge_uid: &ThingUid,
) -> Result<ThingUid, UidError> {
    ThingUid::new(thing_type_uid, bridge_uid.id(), &[])
}

/// Panel-side key of a device: `"{upId}-{downId}"` for shutters, `"{id}"`
/// for everything else.
fn device_key(kind: ThingKind, configuration: &Configuration) -> Result<String, SatelError> {
    let key = if kind == ThingKind::Shutter {
        let up = configuration.key_segment(SatelThingConfig::UP_ID)?;
        let down = configuration.key_segment(SatelThingConfig::DOWN_ID)?;
        format!("{up}-{down}")
    } else {
        configuration.key_segment(SatelThingConfig::ID)?
    };
    Ok(key)
}

/// Compute the uid a new thing should get.
///
/// A supplied uid wins. Otherwise devices derive one from their
/// configuration (scoped by the bridge when there is one) and virtual things
/// from their bridge. Returns `Ok(None)` when nothing can be derived
/// (bridges, virtual things without bridge).
///
/// # Errors
///
/// Returns [`SatelError::UnsupportedThingType`] for foreign types and
/// [`SatelError::Configuration`] when a device lacks the keys its uid is
/// built from.
pub fn resolve_thing_uid(
    thing_type_uid: &ThingTypeUid,
    configuration: &Configuration,
    thing_uid: Option<ThingUid>,
    bridge_uid: Option<&ThingUid>,
) -> Result<Option<ThingUid>, SatelError> {
    if let Some(uid) = thing_uid {
        return Ok(Some(uid));
    }

    let kind = ThingKind::from_type_uid(thing_type_uid)
        .ok_or_else(|| SatelError::UnsupportedThingType(thing_type_uid.clone()))?;

    match (kind.category(), bridge_uid) {
        (ThingCategory::Device, bridge_uid) => {
            let key = device_key(kind, configuration)?;
            let bridge_ids: Vec<&str> = bridge_uid.map(ThingUid::id).into_iter().collect();
            Ok(Some(ThingUid::new(thing_type_uid, &key, &bridge_ids)?))
        }
        (ThingCategory::Virtual, Some(bridge_uid)) => {
            Ok(Some(virtual_thing_uid(thing_type_uid, bridge_uid)?))
        }
        (ThingCategory::Virtual, None) | (ThingCategory::Bridge, _) => Ok(None),
    }
}
