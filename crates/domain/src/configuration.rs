//! Raw, host-supplied thing configuration.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigurationError;

/// String-keyed configuration values as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(BTreeMap<String, Value>);

impl Configuration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value. `null` counts as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Set a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Chaining variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Render a required panel-number key as an identifier segment.
    ///
    /// Accepts the same values typed configs do: a non-negative integer or
    /// a string holding one, both within `u32`. The segment is the number
    /// in decimal.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKey`] when the key is absent and
    /// [`ConfigurationError::InvalidValue`] for anything that is not a panel
    /// number.
    pub fn key_segment(&self, key: &'static str) -> Result<String, ConfigurationError> {
        let value = self.get(key).ok_or(ConfigurationError::MissingKey(key))?;
        panel_number(value)
            .map(|number| number.to_string())
            .ok_or(ConfigurationError::InvalidValue { key })
    }

    /// Deserialize the whole configuration into a typed config struct.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Layout`] if the values do not match `T`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, ConfigurationError> {
        let object = self
            .0
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        serde_json::from_value(Value::Object(object))
            .map_err(|err| ConfigurationError::Layout(err.to_string()))
    }
}

/// Interpret `value` as a panel-side number (zone, output, partition...).
pub(crate) fn panel_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

impl FromIterator<(String, Value)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_integer_as_segment() {
        let config = Configuration::new().with("id", 42);
        assert_eq!(config.key_segment("id").unwrap(), "42");
    }

    #[test]
    fn should_render_numeric_string() {
        let config = Configuration::new().with("id", "7");
        assert_eq!(config.key_segment("id").unwrap(), "7");
    }

    #[test]
    fn should_reject_values_that_are_not_panel_numbers() {
        let config = Configuration::new()
            .with("id", -5)
            .with("upId", "abc")
            .with("downId", u64::from(u32::MAX) + 1);
        for key in ["id", "upId", "downId"] {
            assert_eq!(
                config.key_segment(key),
                Err(ConfigurationError::InvalidValue { key })
            );
        }
    }

    #[test]
    fn should_report_missing_key() {
        let config = Configuration::new();
        assert_eq!(
            config.key_segment("upId"),
            Err(ConfigurationError::MissingKey("upId"))
        );
    }

    #[test]
    fn should_treat_null_as_missing() {
        let config = Configuration::new().with("id", Value::Null);
        assert_eq!(
            config.key_segment("id"),
            Err(ConfigurationError::MissingKey("id"))
        );
    }

    #[test]
    fn should_reject_float_and_bool_values() {
        let config = Configuration::new().with("id", 4.5).with("downId", true);
        assert_eq!(
            config.key_segment("id"),
            Err(ConfigurationError::InvalidValue { key: "id" })
        );
        assert_eq!(
            config.key_segment("downId"),
            Err(ConfigurationError::InvalidValue { key: "downId" })
        );
    }

    #[test]
    fn should_deserialize_from_json_object() {
        let config: Configuration = serde_json::from_str(r#"{"upId": 3, "downId": 7}"#).unwrap();
        assert_eq!(config.key_segment("upId").unwrap(), "3");
        assert_eq!(config.key_segment("downId").unwrap(), "7");
    }

    #[test]
    fn should_report_layout_error_for_wrong_type() {
        #[derive(Debug, Deserialize)]
        struct Typed {
            #[allow(dead_code)]
            id: u32,
        }

        let config = Configuration::new().with("id", "not-a-number");
        let result = config.to_typed::<Typed>();
        assert!(matches!(result, Err(ConfigurationError::Layout(_))));
    }
}
