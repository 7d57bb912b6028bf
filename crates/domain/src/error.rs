//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`SatelError`]
//! via `#[from]`.

use crate::uid::{ThingTypeUid, ThingUid};

/// Top-level error for thing creation and handler initialisation.
#[derive(Debug, thiserror::Error)]
pub enum SatelError {
    /// The configuration of a thing is missing keys or holds invalid values.
    #[error("invalid thing configuration")]
    Configuration(#[from] ConfigurationError),

    /// A thing or thing-type identifier could not be parsed or built.
    #[error("invalid identifier")]
    Uid(#[from] UidError),

    /// The thing type is not part of this binding's catalog.
    #[error("unsupported thing type {0}")]
    UnsupportedThingType(ThingTypeUid),

    /// No uid was supplied and none can be derived for this type.
    #[error("cannot derive a thing uid for type {0}")]
    MissingThingUid(ThingTypeUid),

    /// A child thing was initialised without a parent bridge.
    #[error("thing {0} has no bridge")]
    MissingBridge(ThingUid),

    /// The configured serial port is not present on this host.
    #[error("serial port {port} is not available (host ports: {available:?})")]
    SerialPortUnavailable {
        /// The configured port name.
        port: String,
        /// Ports the host does offer.
        available: Vec<String>,
    },
}

/// Malformed thing configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A required key is absent (or `null`).
    #[error("missing configuration key `{0}`")]
    MissingKey(&'static str),

    /// A key holds a value of the wrong shape.
    #[error("invalid value for configuration key `{key}`")]
    InvalidValue {
        /// The offending key.
        key: &'static str,
    },

    /// The configuration could not be mapped onto the typed config struct.
    #[error("configuration does not match the expected layout: {0}")]
    Layout(String),
}

/// Identifier parse and construction failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UidError {
    /// The identifier has the wrong number of segments.
    #[error("expected at least {expected} segments in `{value}`")]
    SegmentCount {
        /// Minimum number of segments.
        expected: usize,
        /// The rejected input.
        value: String,
    },

    /// A segment is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid segment `{0}`")]
    InvalidSegment(String),
}
