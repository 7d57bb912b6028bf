//! Handler factory — the binding's entry point for the host.
//!
//! The host asks, in order:
//! 1. [`supports_thing_type`](SatelHandlerFactory::supports_thing_type)
//! 2. [`create_thing`](SatelHandlerFactory::create_thing)
//! 3. [`create_handler`](SatelHandlerFactory::create_handler)
//! 4. (later) [`remove_handler`](SatelHandlerFactory::remove_handler)

use std::sync::Arc;

use satel_domain::configuration::Configuration;
use satel_domain::error::SatelError;
use satel_domain::thing::Thing;
use satel_domain::thing_type::{SUPPORTED_THING_TYPES, ThingKind};
use satel_domain::uid::{ThingTypeUid, ThingUid};

use crate::discovery::ThingTypeLookup;
use crate::handler::{
    Atd100Handler, Ethm1BridgeHandler, EventLogHandler, IntRsBridgeHandler, OutputHandler,
    PartitionHandler, SatelBridge, ShutterHandler, SystemHandler, ThingHandler, ZoneHandler,
};
use crate::ports::{SerialPortManager, ServiceRegistry, ThingTypeProvider};
use crate::registrations::DiscoveryRegistrations;
use crate::resolver::resolve_thing_uid;

/// Creates things and handlers for every Satel thing type.
pub struct SatelHandlerFactory<R> {
    registrations: DiscoveryRegistrations<R>,
    thing_types: Arc<dyn ThingTypeProvider>,
    serial_ports: Arc<dyn SerialPortManager>,
}

impl<R: ServiceRegistry> SatelHandlerFactory<R> {
    /// Create a factory publishing discovery services to `registry`.
    ///
    /// `serial_ports` is handed to every INT-RS bridge handler.
    pub fn new(
        registry: R,
        thing_types: Arc<dyn ThingTypeProvider>,
        serial_ports: Arc<dyn SerialPortManager>,
    ) -> Self {
        Self {
            registrations: DiscoveryRegistrations::new(registry),
            thing_types,
            serial_ports,
        }
    }

    /// Whether `thing_type_uid` belongs to this binding.
    #[must_use]
    pub fn supports_thing_type(&self, thing_type_uid: &ThingTypeUid) -> bool {
        SUPPORTED_THING_TYPES.contains(thing_type_uid)
    }

    /// Build a thing, deriving its uid when the caller did not supply one.
    ///
    /// # Errors
    ///
    /// Returns [`SatelError::UnsupportedThingType`] for foreign types,
    /// [`SatelError::Configuration`] when a device lacks its id keys, and
    /// [`SatelError::MissingThingUid`] when no uid was supplied and none can
    /// be derived.
    #[tracing::instrument(skip(self, configuration), fields(thing_type = %thing_type_uid))]
    pub fn create_thing(
        &self,
        thing_type_uid: &ThingTypeUid,
        configuration: Configuration,
        thing_uid: Option<ThingUid>,
        bridge_uid: Option<ThingUid>,
    ) -> Result<Thing, SatelError> {
        if !self.supports_thing_type(thing_type_uid) {
            return Err(SatelError::UnsupportedThingType(thing_type_uid.clone()));
        }

        let uid = resolve_thing_uid(
            thing_type_uid,
            &configuration,
            thing_uid,
            bridge_uid.as_ref(),
        )?
        .ok_or_else(|| SatelError::MissingThingUid(thing_type_uid.clone()))?;

        let mut thing =
            Thing::new(uid, thing_type_uid.clone(), configuration).with_bridge(bridge_uid);
        if let Some(thing_type) = self.thing_types.thing_type(thing_type_uid) {
            thing = thing.with_label(thing_type.label);
        }
        tracing::debug!(thing = %thing.uid, "thing created");
        Ok(thing)
    }

    /// Create the handler for `thing`, or `None` when the type is not ours.
    ///
    /// Bridge handlers get a discovery service registered as a side effect.
    /// A refused registration is logged; the handler is returned regardless.
    #[tracing::instrument(skip_all, fields(thing = %thing.uid))]
    pub fn create_handler(&self, thing: Thing) -> Option<ThingHandler> {
        let Some(kind) = thing.kind() else {
            tracing::debug!(thing_type = %thing.thing_type_uid, "not a satel thing type");
            return None;
        };

        let handler = match kind {
            ThingKind::Ethm1 => ThingHandler::Ethm1(Arc::new(Ethm1BridgeHandler::new(thing))),
            ThingKind::IntRs => ThingHandler::IntRs(Arc::new(IntRsBridgeHandler::new(
                thing,
                Arc::clone(&self.serial_ports),
            ))),
            ThingKind::Zone => ThingHandler::Zone(ZoneHandler::new(thing)),
            ThingKind::Output => ThingHandler::Output(OutputHandler::new(thing)),
            ThingKind::Partition => ThingHandler::Partition(PartitionHandler::new(thing)),
            ThingKind::Shutter => ThingHandler::Shutter(ShutterHandler::new(thing)),
            ThingKind::System => ThingHandler::System(SystemHandler::new(thing)),
            ThingKind::EventLog => ThingHandler::EventLog(EventLogHandler::new(thing)),
            ThingKind::Atd100 => ThingHandler::Atd100(Atd100Handler::new(thing)),
        };
        if let Some(bridge) = handler.as_bridge() {
            self.register_discovery_service(bridge);
        }
        tracing::debug!(%kind, "handler created");
        Some(handler)
    }

    /// Dispose `handler` and release its discovery service, if any.
    #[tracing::instrument(skip_all, fields(thing = %handler.thing_uid()))]
    pub fn remove_handler(&self, handler: &ThingHandler) {
        handler.dispose();
        self.registrations.unregister(handler.thing_uid());
    }

    /// Release every discovery service still registered.
    pub fn shutdown(&self) {
        self.registrations.clear();
    }

    /// The live discovery registrations.
    pub fn registrations(&self) -> &DiscoveryRegistrations<R> {
        &self.registrations
    }

    fn register_discovery_service(&self, bridge: Arc<dyn SatelBridge>) {
        if let Err(err) = self.registrations.register(bridge, self.thing_type_lookup()) {
            tracing::warn!(error = %err, "could not register discovery service");
        }
    }

    fn thing_type_lookup(&self) -> ThingTypeLookup {
        let provider = Arc::clone(&self.thing_types);
        Arc::new(move |uid: &ThingTypeUid| provider.thing_type(uid))
    }
}
