//! Configuration for the delivery simulation
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats; a missing file falls back to defaults.
//!
//! Configuration is organized into logical sections:
//! - Producer settings (emission cadence, payload range, run length)
//! - Bus settings (one bus for everything, or one per domain)
//! - Logging settings (output format, default level)

use crate::error::{ConfigError, ConfigResult, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Longest accepted producer interval: one hour
const MAX_INTERVAL_MS: u64 = 3_600_000;

/// Producer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerSettings {
    /// Milliseconds between two rounds of lifecycle emissions
    pub interval_ms: u64,
    /// Payload values are drawn from `0..max_value`
    pub max_value: u32,
    /// Stop after this many rounds; run until interrupted when absent
    pub ticks: Option<u64>,
}

impl Default for ProducerSettings {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            max_value: 100,
            ticks: None,
        }
    }
}

/// How lifecycle events and the global status event are spread over buses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusTopology {
    /// Lifecycle events on one bus, the global status event on another
    #[default]
    Split,
    /// Everything on a single bus
    Unified,
}

impl std::fmt::Display for BusTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Unified => write!(f, "unified"),
        }
    }
}

/// Bus settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusSettings {
    pub topology: BusTopology,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human friendly
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Default level when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// The configured level as a tracing level
    pub fn tracing_level(&self) -> ConfigResult<tracing::Level> {
        tracing::Level::from_str(&self.level)
            .map_err(|_| ConfigError::UnknownLogLevel(self.level.clone()))
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub producer: ProducerSettings,
    pub bus: BusSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/parcelbus/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("parcelbus").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the platform default file if it
    /// exists, otherwise built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match FileFormat::of(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let interval = self.producer.interval_ms;
        if interval == 0 || interval > MAX_INTERVAL_MS {
            return Err(ConfigError::ValueOutOfRange {
                key: "producer.interval_ms".to_string(),
                value: interval.to_string(),
            });
        }

        if self.producer.max_value == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "producer.max_value".to_string(),
                value: "0".to_string(),
            });
        }

        self.logging.tracing_level()?;
        Ok(())
    }
}

enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.producer.interval_ms, 2000);
        assert_eq!(config.producer.max_value, 100);
        assert_eq!(config.producer.ticks, None);
        assert_eq!(config.bus.topology, BusTopology::Split);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_validate_interval() {
        let mut config = Config::new();
        config.producer.interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "producer.interval_ms"
        ));

        config.producer.interval_ms = MAX_INTERVAL_MS + 1;
        assert!(config.validate().is_err());

        config.producer.interval_ms = MAX_INTERVAL_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_value() {
        let mut config = Config::new();
        config.producer.max_value = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut logging = LoggingSettings::default();
        assert_eq!(logging.tracing_level(), Ok(tracing::Level::INFO));

        logging.level = "DEBUG".to_string();
        assert_eq!(logging.tracing_level(), Ok(tracing::Level::DEBUG));

        logging.level = "chatty".to_string();
        assert_eq!(
            logging.tracing_level(),
            Err(ConfigError::UnknownLogLevel("chatty".to_string()))
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [bus]
            topology = "unified"
            "#,
        )
        .unwrap();
        assert_eq!(config.bus.topology, BusTopology::Unified);
        assert_eq!(config.producer, ProducerSettings::default());
    }

    #[test]
    fn test_topology_display() {
        assert_eq!(BusTopology::Split.to_string(), "split");
        assert_eq!(BusTopology::Unified.to_string(), "unified");
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            FileFormat::of(Path::new("config.yaml")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
        assert!(FileFormat::of(Path::new("config")).is_err());
    }
}
