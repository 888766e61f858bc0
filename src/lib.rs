//! # parcelbus
//!
//! An in-process publish/subscribe event bus modelling a package delivery
//! lifecycle. Lifecycle events ("to be picked up", "in transit", "delivered")
//! are emitted periodically, vendor and driver handlers relay them as a
//! normalized "global" event, and a global observer reports every change.
//!
//! ## Architecture
//!
//! The workspace is organized in three crates plus this binary:
//!
//! 1. **parcelbus-core** - the generic, re-entrant named-event bus
//! 2. **parcelbus-settings** - configuration files and validation
//! 3. **parcelbus-delivery** - payloads, domain handlers, wiring and producer
//! 4. **parcelbus** - CLI that loads settings, sets up logging and runs the
//!    producer

pub mod cli;

pub use parcelbus_core::{
    DeliveryResult, EventBus, HandlerError, HandlerFailure, SubscriptionId, WeakEventBus,
};
pub use parcelbus_delivery::{
    ChangeLog, DeliveryNetwork, DeliveryPayload, DeliveryStage, Producer, StatusChange,
    TickReport, GLOBAL,
};
pub use parcelbus_settings::{
    BusSettings, BusTopology, Config, LogFormat, LoggingSettings, ProducerSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("PARCELBUS_BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - `RUST_LOG` environment variable support, falling back to the configured
///   level
/// - Output on stdout in the configured format
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = settings.tracing_level()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);
    match settings.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_level(true)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().with_writer(std::io::stdout).compact())
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .json()
                    .with_current_span(false),
            )
            .try_init()?,
    }

    Ok(())
}
