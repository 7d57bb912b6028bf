//! Typed configurations for each thing family.
//!
//! All of them are deserialised from a thing's [`Configuration`](crate::configuration::Configuration)
//! using the camelCase keys the host stores.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::configuration::panel_number;
use crate::error::ConfigurationError;

/// Default TCP port of the ETHM-1 module.
pub const DEFAULT_ETHM1_PORT: u16 = 7094;

const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_REFRESH_MS: u64 = 5000;
const MAX_ENCRYPTION_KEY_LEN: usize = 24;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_refresh() -> u64 {
    DEFAULT_REFRESH_MS
}

fn default_ethm1_port() -> u16 {
    DEFAULT_ETHM1_PORT
}

/// Panel numbers arrive either as JSON integers or as numeric strings.
fn optional_panel_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => panel_number(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a panel number, found {value}"))),
    }
}

/// Configuration of device and virtual things.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SatelThingConfig {
    /// Panel-side number of a zone, output, partition or detector.
    #[serde(deserialize_with = "optional_panel_number")]
    pub id: Option<u32>,
    /// Output driving a shutter up.
    #[serde(deserialize_with = "optional_panel_number")]
    pub up_id: Option<u32>,
    /// Output driving a shutter down.
    #[serde(deserialize_with = "optional_panel_number")]
    pub down_id: Option<u32>,
    pub invert_state: bool,
    pub force_arming: bool,
    pub command_only: bool,
    pub wireless: bool,
}

impl SatelThingConfig {
    /// Key holding the panel-side number.
    pub const ID: &'static str = "id";
    /// Key holding the shutter "up" output.
    pub const UP_ID: &'static str = "upId";
    /// Key holding the shutter "down" output.
    pub const DOWN_ID: &'static str = "downId";

    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKey`] when `id` is not set.
    pub fn thing_id(&self) -> Result<u32, ConfigurationError> {
        self.id.ok_or(ConfigurationError::MissingKey(Self::ID))
    }

    /// The `(up, down)` output pair of a shutter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKey`] naming the first absent key.
    pub fn shutter_outputs(&self) -> Result<(u32, u32), ConfigurationError> {
        let up = self.up_id.ok_or(ConfigurationError::MissingKey(Self::UP_ID))?;
        let down = self
            .down_id
            .ok_or(ConfigurationError::MissingKey(Self::DOWN_ID))?;
        Ok((up, down))
    }
}

/// Configuration of the ETHM-1 network bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ethm1Config {
    pub host: String,
    #[serde(default = "default_ethm1_port")]
    pub port: u16,
    /// Response timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Panel polling interval in milliseconds.
    #[serde(default = "default_refresh")]
    pub refresh: u64,
    #[serde(default)]
    pub user_code: Option<String>,
    /// Integration key configured in the module; empty means unencrypted.
    #[serde(default)]
    pub encryption_key: Option<String>,
    #[serde(default)]
    pub ext_commands: bool,
}

impl Ethm1Config {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] for a blank host or an
    /// encryption key longer than 24 characters.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.host.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue { key: "host" });
        }
        if self
            .encryption_key
            .as_ref()
            .is_some_and(|key| key.chars().count() > MAX_ENCRYPTION_KEY_LEN)
        {
            return Err(ConfigurationError::InvalidValue {
                key: "encryptionKey",
            });
        }
        Ok(())
    }

    /// Whether the link must be encrypted.
    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        self.encryption_key
            .as_ref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

/// Configuration of the INT-RS serial bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntRsConfig {
    /// Serial port name (e.g. `/dev/ttyUSB0`).
    pub port: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_refresh")]
    pub refresh: u64,
    #[serde(default)]
    pub user_code: Option<String>,
    #[serde(default)]
    pub ext_commands: bool,
}

impl IntRsConfig {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] for a blank port name.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.port.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue { key: "port" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;

    #[test]
    fn should_default_all_thing_flags_to_false() {
        let config: SatelThingConfig = Configuration::new().to_typed().unwrap();
        assert_eq!(config, SatelThingConfig::default());
    }

    #[test]
    fn should_read_camel_case_thing_keys() {
        let config: SatelThingConfig = Configuration::new()
            .with("upId", 3)
            .with("downId", 7)
            .with("invertState", true)
            .to_typed()
            .unwrap();
        assert_eq!(config.shutter_outputs().unwrap(), (3, 7));
        assert!(config.invert_state);
    }

    #[test]
    fn should_read_panel_numbers_given_as_strings() {
        let config: SatelThingConfig = Configuration::new()
            .with("upId", "3")
            .with("downId", "7")
            .with("id", "42")
            .to_typed()
            .unwrap();
        assert_eq!(config.shutter_outputs().unwrap(), (3, 7));
        assert_eq!(config.thing_id().unwrap(), 42);
    }

    #[test]
    fn should_reject_negative_panel_number() {
        let result = Configuration::new()
            .with("id", -5)
            .to_typed::<SatelThingConfig>();
        assert!(matches!(result, Err(ConfigurationError::Layout(_))));
    }

    #[test]
    fn should_name_missing_down_id() {
        let config = SatelThingConfig {
            up_id: Some(3),
            ..SatelThingConfig::default()
        };
        assert_eq!(
            config.shutter_outputs(),
            Err(ConfigurationError::MissingKey("downId"))
        );
    }

    #[test]
    fn should_name_missing_id() {
        assert_eq!(
            SatelThingConfig::default().thing_id(),
            Err(ConfigurationError::MissingKey("id"))
        );
    }

    #[test]
    fn should_apply_ethm1_defaults() {
        let config: Ethm1Config = Configuration::new()
            .with("host", "192.168.0.10")
            .to_typed()
            .unwrap();
        assert_eq!(config.port, 7094);
        assert_eq!(config.timeout, 5000);
        assert_eq!(config.refresh, 5000);
        assert!(!config.is_encrypted());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_require_ethm1_host() {
        let result = Configuration::new().to_typed::<Ethm1Config>();
        assert!(matches!(result, Err(ConfigurationError::Layout(_))));
    }

    #[test]
    fn should_reject_long_encryption_key() {
        let config: Ethm1Config = Configuration::new()
            .with("host", "panel.local")
            .with("encryptionKey", "x".repeat(25))
            .to_typed()
            .unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidValue {
                key: "encryptionKey"
            })
        );
    }

    #[test]
    fn should_reject_blank_serial_port() {
        let config: IntRsConfig = Configuration::new()
            .with("port", " ")
            .to_typed()
            .unwrap();
        assert!(config.validate().is_err());
    }
}
