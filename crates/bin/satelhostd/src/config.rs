//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `satelhostd.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where things are defined.
    pub things: ThingsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Discovery behaviour.
    pub discovery: DiscoveryConfig,
}

/// Things-file location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThingsConfig {
    /// Path of the TOML file listing bridges and things.
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Run one scan per bridge right after start-up.
    pub scan_on_start: bool,
}

impl Config {
    /// Load configuration from `satelhostd.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("satelhostd.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SATEL_THINGS") {
            self.things.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SATEL_SCAN_ON_START")
            && let Ok(scan) = val.parse()
        {
            self.discovery.scan_on_start = scan;
        }
        if let Ok(val) = std::env::var("SATEL_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.things.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("things path must not be empty"));
        }
        Ok(())
    }
}

impl Default for ThingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("things.toml"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "satelhostd=info,satel_app=info,satel_adapter_host_memory=info".to_string(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scan_on_start: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}
