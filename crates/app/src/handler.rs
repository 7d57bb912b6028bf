//! Thing handlers — one type per thing family.
//!
//! The panel protocol is not implemented here: handlers own their thing,
//! validate its configuration on [`initialize`](ThingHandler::initialize)
//! and track a [`HandlerStatus`]. Bridges additionally implement
//! [`SatelBridge`] so discovery services can be bound to them.

mod bridge;
mod device;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use satel_domain::error::SatelError;
use satel_domain::thing::Thing;
use satel_domain::thing_type::ThingKind;
use satel_domain::uid::ThingUid;

pub use bridge::{Ethm1BridgeHandler, IntRsBridgeHandler};
pub use device::{
    Atd100Handler, EventLogHandler, OutputHandler, PartitionHandler, ShutterHandler,
    SystemHandler, ZoneHandler,
};

/// Why a handler is offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflineReason {
    ConfigurationError,
    BridgeMissing,
    CommunicationError,
}

/// Lifecycle status reported by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerStatus {
    /// Created but not initialised yet.
    Uninitialized,
    /// Configuration accepted; waiting for the panel link.
    Unknown,
    Offline(OfflineReason),
}

/// A handler representing a communication link to the panel.
pub trait SatelBridge: Send + Sync {
    fn thing(&self) -> &Thing;

    fn kind(&self) -> ThingKind;

    fn status(&self) -> HandlerStatus;
}

/// State shared by every handler: its thing and current status.
#[derive(Debug)]
pub(crate) struct HandlerCore {
    thing: Thing,
    status: Mutex<HandlerStatus>,
}

impl HandlerCore {
    pub(crate) fn new(thing: Thing) -> Self {
        Self {
            thing,
            status: Mutex::new(HandlerStatus::Uninitialized),
        }
    }

    pub(crate) fn thing(&self) -> &Thing {
        &self.thing
    }

    pub(crate) fn status(&self) -> HandlerStatus {
        *self.lock_status()
    }

    /// Record the outcome of an initialisation attempt.
    pub(crate) fn settle(&self, outcome: Result<(), SatelError>) -> Result<HandlerStatus, SatelError> {
        let (status, result) = match outcome {
            Ok(()) => (HandlerStatus::Unknown, Ok(HandlerStatus::Unknown)),
            Err(err @ SatelError::MissingBridge(_)) => {
                (HandlerStatus::Offline(OfflineReason::BridgeMissing), Err(err))
            }
            Err(err @ SatelError::SerialPortUnavailable { .. }) => (
                HandlerStatus::Offline(OfflineReason::CommunicationError),
                Err(err),
            ),
            Err(err) => (
                HandlerStatus::Offline(OfflineReason::ConfigurationError),
                Err(err),
            ),
        };
        *self.lock_status() = status;
        if let Err(err) = &result {
            tracing::warn!(thing = %self.thing.uid, ?status, error = %err, "handler initialisation failed");
        } else {
            tracing::debug!(thing = %self.thing.uid, "handler initialised");
        }
        result
    }

    pub(crate) fn dispose(&self) {
        *self.lock_status() = HandlerStatus::Uninitialized;
    }

    fn lock_status(&self) -> MutexGuard<'_, HandlerStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Every handler the factory can create.
///
/// Bridges are shared with their discovery service, hence the `Arc`.
#[derive(Debug)]
pub enum ThingHandler {
    Ethm1(Arc<Ethm1BridgeHandler>),
    IntRs(Arc<IntRsBridgeHandler>),
    Zone(ZoneHandler),
    Output(OutputHandler),
    Partition(PartitionHandler),
    Shutter(ShutterHandler),
    System(SystemHandler),
    EventLog(EventLogHandler),
    Atd100(Atd100Handler),
}

impl ThingHandler {
    fn core(&self) -> &HandlerCore {
        match self {
            Self::Ethm1(h) => h.core(),
            Self::IntRs(h) => h.core(),
            Self::Zone(h) => h.core(),
            Self::Output(h) => h.core(),
            Self::Partition(h) => h.core(),
            Self::Shutter(h) => h.core(),
            Self::System(h) => h.core(),
            Self::EventLog(h) => h.core(),
            Self::Atd100(h) => h.core(),
        }
    }

    /// The thing this handler owns.
    #[must_use]
    pub fn thing(&self) -> &Thing {
        self.core().thing()
    }

    /// Shortcut for `self.thing().uid`.
    #[must_use]
    pub fn thing_uid(&self) -> &ThingUid {
        &self.thing().uid
    }

    #[must_use]
    pub fn kind(&self) -> ThingKind {
        match self {
            Self::Ethm1(_) => ThingKind::Ethm1,
            Self::IntRs(_) => ThingKind::IntRs,
            Self::Zone(_) => ThingKind::Zone,
            Self::Output(_) => ThingKind::Output,
            Self::Partition(_) => ThingKind::Partition,
            Self::Shutter(_) => ThingKind::Shutter,
            Self::System(_) => ThingKind::System,
            Self::EventLog(_) => ThingKind::EventLog,
            Self::Atd100(_) => ThingKind::Atd100,
        }
    }

    #[must_use]
    pub fn status(&self) -> HandlerStatus {
        self.core().status()
    }

    /// Validate the thing's configuration and move to
    /// [`HandlerStatus::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns the configuration problem; the handler is left
    /// [`HandlerStatus::Offline`] with the matching reason.
    pub fn initialize(&self) -> Result<HandlerStatus, SatelError> {
        match self {
            Self::Ethm1(h) => h.initialize(),
            Self::IntRs(h) => h.initialize(),
            Self::Zone(h) => h.initialize(),
            Self::Output(h) => h.initialize(),
            Self::Partition(h) => h.initialize(),
            Self::Shutter(h) => h.initialize(),
            Self::System(h) => h.initialize(),
            Self::EventLog(h) => h.initialize(),
            Self::Atd100(h) => h.initialize(),
        }
    }

    /// Return to [`HandlerStatus::Uninitialized`].
    pub fn dispose(&self) {
        self.core().dispose();
    }

    /// The bridge view of this handler, if it is one.
    #[must_use]
    pub fn as_bridge(&self) -> Option<Arc<dyn SatelBridge>> {
        match self {
            Self::Ethm1(h) => Some(Arc::clone(h) as Arc<dyn SatelBridge>),
            Self::IntRs(h) => Some(Arc::clone(h) as Arc<dyn SatelBridge>),
            Self::Zone(_)
            | Self::Output(_)
            | Self::Partition(_)
            | Self::Shutter(_)
            | Self::System(_)
            | Self::EventLog(_)
            | Self::Atd100(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satel_domain::configuration::Configuration;

    fn zone_thing(configuration: Configuration) -> Thing {
        let kind = ThingKind::Zone;
        let bridge = ThingUid::new(&ThingKind::Ethm1.type_uid(), "home", &[]).unwrap();
        let uid = ThingUid::new(&kind.type_uid(), "1", &["home"]).unwrap();
        Thing::new(uid, kind.type_uid(), configuration).with_bridge(Some(bridge))
    }

    #[test]
    fn should_start_uninitialized() {
        let handler = ThingHandler::Zone(ZoneHandler::new(zone_thing(Configuration::new())));
        assert_eq!(handler.status(), HandlerStatus::Uninitialized);
        assert_eq!(handler.kind(), ThingKind::Zone);
    }

    #[test]
    fn should_move_to_unknown_after_successful_initialize() {
        let handler = ThingHandler::Zone(ZoneHandler::new(zone_thing(
            Configuration::new().with("id", 1),
        )));
        assert_eq!(handler.initialize().unwrap(), HandlerStatus::Unknown);
        assert_eq!(handler.status(), HandlerStatus::Unknown);
    }

    #[test]
    fn should_go_offline_on_configuration_error() {
        let handler = ThingHandler::Zone(ZoneHandler::new(zone_thing(Configuration::new())));
        assert!(handler.initialize().is_err());
        assert_eq!(
            handler.status(),
            HandlerStatus::Offline(OfflineReason::ConfigurationError)
        );
    }

    #[test]
    fn should_reset_status_on_dispose() {
        let handler = ThingHandler::Zone(ZoneHandler::new(zone_thing(
            Configuration::new().with("id", 1),
        )));
        handler.initialize().unwrap();
        handler.dispose();
        assert_eq!(handler.status(), HandlerStatus::Uninitialized);
    }

    #[test]
    fn should_not_expose_device_as_bridge() {
        let handler = ThingHandler::Zone(ZoneHandler::new(zone_thing(Configuration::new())));
        assert!(handler.as_bridge().is_none());
    }
}
