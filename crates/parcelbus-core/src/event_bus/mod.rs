//! # Event Bus Module
//!
//! Named-event publish/subscribe with synchronous, re-entrant dispatch.
//!
//! ## Overview
//!
//! - Handlers subscribe to an event name and receive a shared reference to
//!   each emitted payload
//! - `emit` runs every handler on the calling thread, in registration order,
//!   and returns a [`DeliveryResult`]
//! - Handlers may emit, subscribe or unsubscribe on the same bus while being
//!   dispatched; each `emit` works from the handler list captured when it
//!   started
//! - A failing or panicking handler never stops its siblings
//!
//! ## Usage
//!
//! ```rust
//! use parcelbus_core::event_bus::EventBus;
//!
//! let bus: EventBus<u32> = EventBus::new();
//! let relay = bus.downgrade();
//!
//! bus.subscribe("global", |value| {
//!     println!("change occurred: {value}");
//!     Ok(())
//! });
//! bus.subscribe("delivered", move |value| {
//!     if let Some(bus) = relay.upgrade() {
//!         bus.emit("global", value);
//!     }
//!     Ok(())
//! });
//!
//! let result = bus.emit("delivered", &42);
//! assert_eq!(result.invoked, 1);
//! assert!(result.is_success());
//! ```

mod bus;
mod delivery;

pub use bus::*;
pub use delivery::*;
