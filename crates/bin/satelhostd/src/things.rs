//! Things file — the bridges and things the host should instantiate.
//!
//! ```toml
//! [[bridge]]
//! type = "ethm-1"
//! id = "home"
//! config = { host = "192.168.1.10" }
//!
//! [[thing]]
//! type = "shutter"
//! bridge = "satel:ethm-1:home"
//! config = { upId = 3, downId = 7 }
//! ```
//!
//! Bare type names are taken from the `satel` binding; `binding:type` is
//! accepted as well.
//!
//! `id` names bridges and, with `bridge`, devices whose config lacks panel
//! numbers. Virtual things (`system`, `event-log`) always take their bridge's
//! id, so an `id` on them is rejected. An explicit `uid` must belong to the
//! entry's type.

use std::path::Path;

use serde::Deserialize;

use satel_app::factory::SatelHandlerFactory;
use satel_app::handler::ThingHandler;
use satel_app::ports::ServiceRegistry;
use satel_domain::configuration::Configuration;
use satel_domain::error::UidError;
use satel_domain::thing_type::{BINDING_ID, ThingCategory, ThingKind};
use satel_domain::uid::{ThingTypeUid, ThingUid};

/// One `[[bridge]]` or `[[thing]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ThingEntry {
    #[serde(rename = "type")]
    pub thing_type: String,
    /// Short id; for bridges it becomes the last uid segment.
    pub id: Option<String>,
    /// Full uid, bypassing derivation.
    pub uid: Option<ThingUid>,
    pub bridge: Option<ThingUid>,
    pub label: Option<String>,
    #[serde(default)]
    pub config: Configuration,
}

impl ThingEntry {
    /// The entry's type uid.
    ///
    /// # Errors
    ///
    /// Returns [`UidError`] for malformed type names.
    pub fn type_uid(&self) -> Result<ThingTypeUid, UidError> {
        if self.thing_type.contains(':') {
            self.thing_type.parse()
        } else {
            ThingTypeUid::new(BINDING_ID, &self.thing_type)
        }
    }

    /// The uid the entry asks for, if any: `uid` wins over `id`.
    fn requested_uid(&self, type_uid: &ThingTypeUid) -> Result<Option<ThingUid>, EntryError> {
        match (&self.uid, &self.id) {
            (Some(uid), _) if uid.thing_type_uid() != *type_uid => {
                Err(EntryError::UidTypeMismatch {
                    uid: uid.clone(),
                    thing_type: type_uid.clone(),
                })
            }
            (Some(uid), _) => Ok(Some(uid.clone())),
            (None, Some(_))
                if ThingKind::from_type_uid(type_uid)
                    .is_some_and(|kind| kind.category() == ThingCategory::Virtual) =>
            {
                Err(EntryError::IdOnVirtualThing(type_uid.clone()))
            }
            (None, Some(id)) => {
                let bridge_ids: Vec<&str> = self.bridge.iter().map(ThingUid::id).collect();
                Ok(Some(ThingUid::new(type_uid, id, &bridge_ids)?))
            }
            (None, None) => Ok(None),
        }
    }
}

/// Contents of a things file.
#[derive(Debug, Default, Deserialize)]
pub struct ThingsFile {
    #[serde(default, rename = "bridge")]
    pub bridges: Vec<ThingEntry>,
    #[serde(default, rename = "thing")]
    pub things: Vec<ThingEntry>,
}

impl ThingsFile {
    /// Read and parse a things file. A missing file yields no things.
    ///
    /// # Errors
    ///
    /// Returns [`ThingsFileError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ThingsFileError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "things file not found");
                Ok(Self::default())
            }
            Err(err) => Err(ThingsFileError::Io(err)),
        }
    }

    /// # Errors
    ///
    /// Returns [`ThingsFileError::Parse`] for malformed TOML.
    pub fn parse(content: &str) -> Result<Self, ThingsFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Bridges first, so children can refer to them.
    pub fn entries(&self) -> impl Iterator<Item = &ThingEntry> {
        self.bridges.iter().chain(self.things.iter())
    }
}

/// Things-file errors.
#[derive(Debug, thiserror::Error)]
pub enum ThingsFileError {
    #[error("failed to parse things file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read things file")]
    Io(#[from] std::io::Error),
}

/// An entry that cannot name a thing.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error(transparent)]
    Uid(#[from] UidError),
    #[error("uid {uid} does not belong to type {thing_type}")]
    UidTypeMismatch {
        uid: ThingUid,
        thing_type: ThingTypeUid,
    },
    #[error("virtual thing type {0} takes its bridge's id; drop `id`")]
    IdOnVirtualThing(ThingTypeUid),
}

/// Create and initialise a handler for every entry the factory accepts.
///
/// Entries that cannot be turned into a thing are logged and skipped;
/// handlers whose initialisation fails are kept (offline) so they can be
/// removed like any other.
pub fn instantiate<R: ServiceRegistry>(
    factory: &SatelHandlerFactory<R>,
    file: &ThingsFile,
) -> Vec<ThingHandler> {
    let mut handlers = Vec::new();
    for entry in file.entries() {
        let type_uid = match entry.type_uid() {
            Ok(type_uid) => type_uid,
            Err(err) => {
                tracing::warn!(thing_type = %entry.thing_type, error = %err, "skipping entry");
                continue;
            }
        };
        if !factory.supports_thing_type(&type_uid) {
            tracing::warn!(thing_type = %type_uid, "unsupported thing type, skipping entry");
            continue;
        }

        let requested = match entry.requested_uid(&type_uid) {
            Ok(requested) => requested,
            Err(err) => {
                tracing::warn!(thing_type = %type_uid, error = %err, "skipping entry");
                continue;
            }
        };
        let thing =
            factory.create_thing(&type_uid, entry.config.clone(), requested, entry.bridge.clone());
        let mut thing = match thing {
            Ok(thing) => thing,
            Err(err) => {
                tracing::warn!(thing_type = %type_uid, error = %err, "could not create thing");
                continue;
            }
        };
        if let Some(label) = &entry.label {
            thing = thing.with_label(label.clone());
        }

        let Some(handler) = factory.create_handler(thing) else {
            continue;
        };
        match handler.initialize() {
            Ok(status) => tracing::info!(thing = %handler.thing_uid(), ?status, "thing ready"),
            Err(err) => tracing::warn!(thing = %handler.thing_uid(), error = %err, "thing offline"),
        }
        handlers.push(handler);
    }
    handlers
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use satel_adapter_host_memory::{InMemoryServiceRegistry, StaticThingTypeProvider};
    use satel_app::handler::{HandlerStatus, OfflineReason};
    use satel_app::ports::{SerialPortIdentifier, SerialPortManager};

    struct NoPorts;

    impl SerialPortManager for NoPorts {
        fn port_identifier(&self, _name: &str) -> Option<SerialPortIdentifier> {
            None
        }

        fn port_names(&self) -> Vec<String> {
            Vec::new()
        }
    }

    const SAMPLE: &str = r#"
        [[bridge]]
        type = "ethm-1"
        id = "home"
        label = "Home panel"
        config = { host = "192.168.1.10" }

        [[thing]]
        type = "shutter"
        bridge = "satel:ethm-1:home"
        config = { upId = 3, downId = 7 }

        [[thing]]
        type = "satel:zone"
        bridge = "satel:ethm-1:home"
        config = { id = 42 }

        [[thing]]
        type = "system"
        bridge = "satel:ethm-1:home"
    "#;

    fn factory() -> (SatelHandlerFactory<InMemoryServiceRegistry>, InMemoryServiceRegistry) {
        let registry = InMemoryServiceRegistry::new();
        let factory = SatelHandlerFactory::new(
            registry.clone(),
            Arc::new(StaticThingTypeProvider::default()),
            Arc::new(NoPorts),
        );
        (factory, registry)
    }

    #[test]
    fn should_parse_bridges_and_things() {
        let file = ThingsFile::parse(SAMPLE).unwrap();
        assert_eq!(file.bridges.len(), 1);
        assert_eq!(file.things.len(), 3);
        assert_eq!(file.bridges[0].label.as_deref(), Some("Home panel"));
    }

    #[test]
    fn should_accept_short_and_full_type_names() {
        let file = ThingsFile::parse(SAMPLE).unwrap();
        assert_eq!(file.things[0].type_uid().unwrap().to_string(), "satel:shutter");
        assert_eq!(file.things[1].type_uid().unwrap().to_string(), "satel:zone");
    }

    #[test]
    fn should_instantiate_every_entry() {
        let (factory, registry) = factory();
        let file = ThingsFile::parse(SAMPLE).unwrap();

        let handlers = instantiate(&factory, &file);

        let uids: Vec<String> = handlers.iter().map(|h| h.thing_uid().to_string()).collect();
        assert_eq!(
            uids,
            [
                "satel:ethm-1:home",
                "satel:shutter:home:3-7",
                "satel:zone:home:42",
                "satel:system:home",
            ]
        );
        assert!(handlers.iter().all(|h| h.status() == HandlerStatus::Unknown));
        assert_eq!(registry.len(), 1);
        assert_eq!(handlers[0].thing().label.as_deref(), Some("Home panel"));
    }

    #[test]
    fn should_skip_foreign_and_malformed_entries() {
        let (factory, _) = factory();
        let file = ThingsFile::parse(
            r#"
            [[thing]]
            type = "hue:bulb"
            id = "1"

            [[thing]]
            type = "zone"
            bridge = "satel:ethm-1:home"
            "#,
        )
        .unwrap();

        assert!(instantiate(&factory, &file).is_empty());
    }

    #[test]
    fn should_keep_offline_serial_bridge() {
        let (factory, registry) = factory();
        let file = ThingsFile::parse(
            r#"
            [[bridge]]
            type = "int-rs"
            id = "basement"
            config = { port = "/dev/ttyUSB7" }
            "#,
        )
        .unwrap();

        let handlers = instantiate(&factory, &file);

        assert_eq!(handlers.len(), 1);
        assert_eq!(
            handlers[0].status(),
            HandlerStatus::Offline(OfflineReason::CommunicationError)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn should_reject_id_on_virtual_entry() {
        let file = ThingsFile::parse(
            r#"
            [[thing]]
            type = "system"
            id = "x"
            bridge = "satel:ethm-1:home"
            "#,
        )
        .unwrap();
        let entry = &file.things[0];

        let result = entry.requested_uid(&entry.type_uid().unwrap());

        assert!(matches!(result, Err(EntryError::IdOnVirtualThing(_))));
        let (factory, _) = factory();
        assert!(instantiate(&factory, &file).is_empty());
    }

    #[test]
    fn should_reject_uid_of_another_type() {
        let file = ThingsFile::parse(
            r#"
            [[bridge]]
            type = "int-rs"
            uid = "satel:ethm-1:home"
            config = { port = "/dev/ttyUSB0" }
            "#,
        )
        .unwrap();
        let entry = &file.bridges[0];

        let result = entry.requested_uid(&entry.type_uid().unwrap());

        assert!(matches!(result, Err(EntryError::UidTypeMismatch { .. })));
    }

    #[test]
    fn should_keep_explicit_uid_of_matching_type() {
        let file = ThingsFile::parse(
            r#"
            [[bridge]]
            type = "ethm-1"
            uid = "satel:ethm-1:home"
            config = { host = "10.0.0.2" }
            "#,
        )
        .unwrap();
        let entry = &file.bridges[0];

        let uid = entry.requested_uid(&entry.type_uid().unwrap()).unwrap();

        assert_eq!(uid.map(|uid| uid.to_string()).as_deref(), Some("satel:ethm-1:home"));
    }

    #[test]
    fn should_treat_missing_file_as_empty() {
        let file = ThingsFile::load(Path::new("/nonexistent/things.toml")).unwrap();
        assert_eq!(file.entries().count(), 0);
    }
}
