//! The closed catalog of thing types handled by the Satel binding.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use crate::uid::ThingTypeUid;

/// Binding segment shared by every Satel thing type.
pub const BINDING_ID: &str = "satel";

/// Role of a thing type within the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThingCategory {
    /// Communication link to the panel; owns child things.
    Bridge,
    /// Configured end device addressed by a panel-side number.
    Device,
    /// Per-bridge singleton with no configuration of its own.
    Virtual,
}

/// Every thing type the binding knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThingKind {
    /// ETHM-1 network module.
    Ethm1,
    /// INT-RS serial module.
    IntRs,
    Partition,
    Zone,
    Output,
    /// Roller shutter driven by an up/down output pair.
    Shutter,
    /// ATD-100 wireless temperature detector.
    Atd100,
    /// Global panel status.
    System,
    /// Panel event log reader.
    EventLog,
}

impl ThingKind {
    /// All kinds, bridges first.
    pub const ALL: [Self; 9] = [
        Self::Ethm1,
        Self::IntRs,
        Self::Partition,
        Self::Zone,
        Self::Output,
        Self::Shutter,
        Self::Atd100,
        Self::System,
        Self::EventLog,
    ];

    /// The type segment of this kind's [`ThingTypeUid`].
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Ethm1 => "ethm-1",
            Self::IntRs => "int-rs",
            Self::Partition => "partition",
            Self::Zone => "zone",
            Self::Output => "output",
            Self::Shutter => "shutter",
            Self::Atd100 => "atd-100",
            Self::System => "system",
            Self::EventLog => "event-log",
        }
    }

    #[must_use]
    pub fn category(self) -> ThingCategory {
        match self {
            Self::Ethm1 | Self::IntRs => ThingCategory::Bridge,
            Self::Partition | Self::Zone | Self::Output | Self::Shutter | Self::Atd100 => {
                ThingCategory::Device
            }
            Self::System | Self::EventLog => ThingCategory::Virtual,
        }
    }

    /// Build the full type uid (`satel:<id>`).
    #[must_use]
    pub fn type_uid(self) -> ThingTypeUid {
        ThingTypeUid::from_static(BINDING_ID, self.id())
    }

    /// Map a type uid back onto the catalog. Returns `None` for types owned
    /// by other bindings or unknown ids.
    #[must_use]
    pub fn from_type_uid(uid: &ThingTypeUid) -> Option<Self> {
        if uid.binding_id() != BINDING_ID {
            return None;
        }
        Self::ALL.into_iter().find(|kind| kind.id() == uid.id())
    }
}

impl fmt::Display for ThingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn catalog(category: ThingCategory) -> HashSet<ThingTypeUid> {
    ThingKind::ALL
        .into_iter()
        .filter(|kind| kind.category() == category)
        .map(ThingKind::type_uid)
        .collect()
}

/// Bridge thing types.
pub static BRIDGE_THING_TYPES: LazyLock<HashSet<ThingTypeUid>> =
    LazyLock::new(|| catalog(ThingCategory::Bridge));

/// Configured end-device thing types.
pub static DEVICE_THING_TYPES: LazyLock<HashSet<ThingTypeUid>> =
    LazyLock::new(|| catalog(ThingCategory::Device));

/// Per-bridge virtual thing types.
pub static VIRTUAL_THING_TYPES: LazyLock<HashSet<ThingTypeUid>> =
    LazyLock::new(|| catalog(ThingCategory::Virtual));

/// Union of the three catalogs.
pub static SUPPORTED_THING_TYPES: LazyLock<HashSet<ThingTypeUid>> = LazyLock::new(|| {
    BRIDGE_THING_TYPES
        .iter()
        .chain(DEVICE_THING_TYPES.iter())
        .chain(VIRTUAL_THING_TYPES.iter())
        .cloned()
        .collect()
});
