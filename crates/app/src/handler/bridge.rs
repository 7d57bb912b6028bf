//! Bridge handlers — ETHM-1 (TCP) and INT-RS (RS-232).

use std::fmt;
use std::sync::Arc;

use satel_domain::config::{Ethm1Config, IntRsConfig};
use satel_domain::error::SatelError;
use satel_domain::thing::Thing;
use satel_domain::thing_type::ThingKind;

use super::{HandlerCore, HandlerStatus, SatelBridge};
use crate::ports::SerialPortManager;

/// Bridge for a panel reached through an ETHM-1 network module.
#[derive(Debug)]
pub struct Ethm1BridgeHandler {
    core: HandlerCore,
}

impl Ethm1BridgeHandler {
    #[must_use]
    pub fn new(thing: Thing) -> Self {
        Self {
            core: HandlerCore::new(thing),
        }
    }

    pub(crate) fn core(&self) -> &HandlerCore {
        &self.core
    }

    /// Parse and validate the module configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SatelError::Configuration`] when `host` is missing or a
    /// value is out of range.
    pub fn config(&self) -> Result<Ethm1Config, SatelError> {
        let config: Ethm1Config = self.core.thing().configuration.to_typed()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// See [`config`](Self::config).
    pub fn initialize(&self) -> Result<HandlerStatus, SatelError> {
        let outcome = self.config().map(|config| {
            tracing::debug!(
                thing = %self.core.thing().uid,
                host = %config.host,
                port = config.port,
                encrypted = config.is_encrypted(),
                "ethm-1 bridge configured"
            );
        });
        self.core.settle(outcome)
    }
}

impl SatelBridge for Ethm1BridgeHandler {
    fn thing(&self) -> &Thing {
        self.core.thing()
    }

    fn kind(&self) -> ThingKind {
        ThingKind::Ethm1
    }

    fn status(&self) -> HandlerStatus {
        self.core.status()
    }
}

/// Bridge for a panel reached through an INT-RS serial module.
pub struct IntRsBridgeHandler {
    core: HandlerCore,
    serial_ports: Arc<dyn SerialPortManager>,
}

impl IntRsBridgeHandler {
    #[must_use]
    pub fn new(thing: Thing, serial_ports: Arc<dyn SerialPortManager>) -> Self {
        Self {
            core: HandlerCore::new(thing),
            serial_ports,
        }
    }

    pub(crate) fn core(&self) -> &HandlerCore {
        &self.core
    }

    /// Parse and validate the module configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SatelError::Configuration`] when `port` is missing or blank.
    pub fn config(&self) -> Result<IntRsConfig, SatelError> {
        let config: IntRsConfig = self.core.thing().configuration.to_typed()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns a configuration error, or [`SatelError::SerialPortUnavailable`]
    /// listing the host's ports when the configured one is not present.
    pub fn initialize(&self) -> Result<HandlerStatus, SatelError> {
        let outcome = self.config().and_then(|config| {
            let Some(port) = self.serial_ports.port_identifier(&config.port) else {
                return Err(SatelError::SerialPortUnavailable {
                    port: config.port,
                    available: self.serial_ports.port_names(),
                });
            };
            tracing::debug!(
                thing = %self.core.thing().uid,
                port = %port.name,
                description = port.description.as_deref().unwrap_or("unknown"),
                "int-rs bridge configured"
            );
            Ok(())
        });
        self.core.settle(outcome)
    }
}

impl fmt::Debug for IntRsBridgeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntRsBridgeHandler")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl SatelBridge for IntRsBridgeHandler {
    fn thing(&self) -> &Thing {
        self.core.thing()
    }

    fn kind(&self) -> ThingKind {
        ThingKind::IntRs
    }

    fn status(&self) -> HandlerStatus {
        self.core.status()
    }
}
