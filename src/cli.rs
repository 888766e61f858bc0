//! Command line interface of the `parcelbus` binary.

use clap::Parser;
use parcelbus_settings::{BusTopology, Config, LogFormat};
use std::path::PathBuf;

/// Simulated package delivery lifecycle over an in-process event bus
#[derive(Debug, Parser)]
#[command(name = "parcelbus", version, about)]
pub struct Cli {
    /// Config file (.toml or .json)
    #[arg(short, long, env = "PARCELBUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stop after this many rounds of emissions
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Milliseconds between rounds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Put lifecycle and status events on one bus
    #[arg(long)]
    pub unified: bool,

    /// Log output format
    #[arg(long, value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Load the config file (or defaults) and apply command line overrides
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;

        if let Some(ticks) = self.ticks {
            config.producer.ticks = Some(ticks);
        }
        if let Some(interval_ms) = self.interval_ms {
            config.producer.interval_ms = interval_ms;
        }
        if self.unified {
            config.bus.topology = BusTopology::Unified;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "pretty" => Ok(LogFormat::Pretty),
        "compact" => Ok(LogFormat::Compact),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format '{other}', expected pretty, compact or json")),
    }
}
