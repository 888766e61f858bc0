//! parcelbus Settings Crate
//!
//! Handles configuration of the delivery simulation: producer cadence, bus
//! topology and logging output.

pub mod config;
pub mod error;

pub use config::{BusSettings, BusTopology, Config, LogFormat, LoggingSettings, ProducerSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
