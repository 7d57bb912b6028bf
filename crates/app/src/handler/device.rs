//! Child handlers — end devices and per-bridge virtual things.

use satel_domain::config::SatelThingConfig;
use satel_domain::error::SatelError;
use satel_domain::thing::Thing;

use super::{HandlerCore, HandlerStatus};

/// Children are meaningless without the bridge that talks to the panel.
fn require_bridge(thing: &Thing) -> Result<(), SatelError> {
    if thing.bridge_uid.is_some() {
        Ok(())
    } else {
        Err(SatelError::MissingBridge(thing.uid.clone()))
    }
}

fn numbered(thing: &Thing) -> Result<(), SatelError> {
    require_bridge(thing)?;
    let config: SatelThingConfig = thing.configuration.to_typed()?;
    config.thing_id()?;
    Ok(())
}

fn shutter(thing: &Thing) -> Result<(), SatelError> {
    require_bridge(thing)?;
    let config: SatelThingConfig = thing.configuration.to_typed()?;
    config.shutter_outputs()?;
    Ok(())
}

macro_rules! define_device_handler {
    ($(#[doc = $doc:expr])* $name:ident, $validate:path) => {
        $(#[doc = $doc])*
        #[derive(Debug)]
        pub struct $name {
            core: HandlerCore,
        }

        impl $name {
            #[must_use]
            pub fn new(thing: Thing) -> Self {
                Self {
                    core: HandlerCore::new(thing),
                }
            }

            pub(crate) fn core(&self) -> &HandlerCore {
                &self.core
            }

            /// Validate configuration and bridge attachment.
            ///
            /// # Errors
            ///
            /// Returns [`SatelError::MissingBridge`] or a configuration error.
            pub fn initialize(&self) -> Result<HandlerStatus, SatelError> {
                self.core.settle($validate(self.core.thing()))
            }
        }
    };
}

define_device_handler!(
    /// Handler for an alarm zone (detector input).
    ZoneHandler,
    numbered
);

define_device_handler!(
    /// Handler for a panel output (relay).
    OutputHandler,
    numbered
);

define_device_handler!(
    /// Handler for a partition.
    PartitionHandler,
    numbered
);

define_device_handler!(
    /// Handler for a roller shutter driven by two outputs.
    ShutterHandler,
    shutter
);

define_device_handler!(
    /// Handler for the panel-wide status thing.
    SystemHandler,
    require_bridge
);

define_device_handler!(
    /// Handler reading the panel event log.
    EventLogHandler,
    require_bridge
);

define_device_handler!(
    /// Handler for an ATD-100 wireless temperature detector.
    Atd100Handler,
    numbered
);

#[cfg(test)]
mod tests {
    use super::*;
    use satel_domain::configuration::Configuration;
    use satel_domain::error::ConfigurationError;
    use satel_domain::thing_type::ThingKind;
    use satel_domain::uid::ThingUid;

    fn child(kind: ThingKind, id: &str, configuration: Configuration, bridged: bool) -> Thing {
        let bridge = ThingUid::new(&ThingKind::IntRs.type_uid(), "panel", &[]).unwrap();
        let uid = ThingUid::new(&kind.type_uid(), id, &["panel"]).unwrap();
        Thing::new(uid, kind.type_uid(), configuration).with_bridge(bridged.then_some(bridge))
    }

    #[test]
    fn should_initialize_output_with_id() {
        let handler = OutputHandler::new(child(
            ThingKind::Output,
            "5",
            Configuration::new().with("id", 5),
            true,
        ));
        assert_eq!(handler.initialize().unwrap(), HandlerStatus::Unknown);
    }

    #[test]
    fn should_require_bridge_for_partition() {
        let handler = PartitionHandler::new(child(
            ThingKind::Partition,
            "1",
            Configuration::new().with("id", 1),
            false,
        ));
        assert!(matches!(
            handler.initialize(),
            Err(SatelError::MissingBridge(_))
        ));
    }

    #[test]
    fn should_require_both_shutter_outputs() {
        let handler = ShutterHandler::new(child(
            ThingKind::Shutter,
            "3-7",
            Configuration::new().with("upId", 3),
            true,
        ));
        assert!(matches!(
            handler.initialize(),
            Err(SatelError::Configuration(ConfigurationError::MissingKey("downId")))
        ));
    }

    #[test]
    fn should_accept_shutter_with_both_outputs() {
        let handler = ShutterHandler::new(child(
            ThingKind::Shutter,
            "3-7",
            Configuration::new().with("upId", 3).with("downId", 7),
            true,
        ));
        assert_eq!(handler.initialize().unwrap(), HandlerStatus::Unknown);
    }

    #[test]
    fn should_initialize_virtual_things_without_configuration() {
        let system = SystemHandler::new(child(ThingKind::System, "panel", Configuration::new(), true));
        let log = EventLogHandler::new(child(ThingKind::EventLog, "panel", Configuration::new(), true));
        assert!(system.initialize().is_ok());
        assert!(log.initialize().is_ok());
    }

    #[test]
    fn should_reject_non_numeric_atd100_id() {
        let handler = Atd100Handler::new(child(
            ThingKind::Atd100,
            "x",
            Configuration::new().with("id", "x"),
            true,
        ));
        assert!(matches!(
            handler.initialize(),
            Err(SatelError::Configuration(ConfigurationError::Layout(_)))
        ));
    }
}
