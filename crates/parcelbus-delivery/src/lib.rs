//! # parcelbus delivery
//!
//! The package delivery lifecycle on top of the core event bus:
//! - Lifecycle events ("to be picked up", "in transit", "delivered") and the
//!   normalized "global" status event
//! - Vendor and driver handlers that relay lifecycle events as status changes
//! - A terminal global observer that records every change
//! - A periodic producer that drives the whole thing

pub mod events;
pub mod handlers;
pub mod network;
pub mod producer;

pub use events::{DeliveryPayload, DeliveryStage, StatusChange, GLOBAL};
pub use handlers::{driver_handler, global_handler, vendor_handler, ChangeLog};
pub use network::DeliveryNetwork;
pub use producer::{Producer, TickReport};
