//! Colon-separated identifiers for thing types and things.
//!
//! A [`ThingTypeUid`] looks like `satel:zone`, a [`ThingUid`] like
//! `satel:zone:home:42` (binding, type, bridge ids, id).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UidError;

const SEPARATOR: char = ':';

fn validate_segment(segment: &str) -> Result<(), UidError> {
    let valid = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(UidError::InvalidSegment(segment.to_string()))
    }
}

/// Identifier of a thing type: `binding:type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThingTypeUid {
    binding_id: String,
    id: String,
}

impl ThingTypeUid {
    /// Build a type uid from its binding and type segments.
    ///
    /// # Errors
    ///
    /// Returns [`UidError::InvalidSegment`] if either segment is empty or
    /// contains characters outside `[A-Za-z0-9_-]`.
    pub fn new(binding_id: &str, id: &str) -> Result<Self, UidError> {
        validate_segment(binding_id)?;
        validate_segment(id)?;
        Ok(Self {
            binding_id: binding_id.to_string(),
            id: id.to_string(),
        })
    }

    /// Catalog constants are known-valid segments.
    pub(crate) fn from_static(binding_id: &'static str, id: &'static str) -> Self {
        Self {
            binding_id: binding_id.to_string(),
            id: id.to_string(),
        }
    }

    /// The binding segment (e.g. `satel`).
    #[must_use]
    pub fn binding_id(&self) -> &str {
        &self.binding_id
    }

    /// The type segment (e.g. `zone`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ThingTypeUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.binding_id, self.id)
    }
}

impl FromStr for ThingTypeUid {
    type Err = UidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split(SEPARATOR).collect::<Vec<_>>().as_slice() {
            [binding_id, id] => Self::new(binding_id, id),
            _ => Err(UidError::SegmentCount {
                expected: 2,
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ThingTypeUid {
    type Error = UidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThingTypeUid> for String {
    fn from(value: ThingTypeUid) -> Self {
        value.to_string()
    }
}

/// Identifier of one configured thing: `binding:type:[bridge-id:...]id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThingUid {
    segments: Vec<String>,
}

impl ThingUid {
    /// Build a thing uid for `thing_type`, scoped by the given bridge ids.
    ///
    /// # Errors
    ///
    /// Returns [`UidError::InvalidSegment`] if `id` or any bridge id is not a
    /// valid segment.
    pub fn new(thing_type: &ThingTypeUid, id: &str, bridge_ids: &[&str]) -> Result<Self, UidError> {
        let mut segments = Vec::with_capacity(bridge_ids.len() + 3);
        segments.push(thing_type.binding_id.clone());
        segments.push(thing_type.id.clone());
        for bridge_id in bridge_ids {
            validate_segment(bridge_id)?;
            segments.push((*bridge_id).to_string());
        }
        validate_segment(id)?;
        segments.push(id.to_string());
        Ok(Self { segments })
    }

    /// The thing type this uid was built for.
    #[must_use]
    pub fn thing_type_uid(&self) -> ThingTypeUid {
        ThingTypeUid {
            binding_id: self.segments[0].clone(),
            id: self.segments[1].clone(),
        }
    }

    /// The last segment.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }
}

impl fmt::Display for ThingUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ThingUid {
    type Err = UidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s.split(SEPARATOR).map(str::to_string).collect();
        if segments.len() < 3 {
            return Err(UidError::SegmentCount {
                expected: 3,
                value: s.to_string(),
            });
        }
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self { segments })
    }
}

impl TryFrom<String> for ThingUid {
    type Error = UidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThingUid> for String {
    fn from(value: ThingUid) -> Self {
        value.to_string()
    }
}
