//! # parcelbus core
//!
//! The in-process event bus that the delivery lifecycle is built on, and the
//! error types it reports handler failures with.

pub mod error;
pub mod event_bus;

pub use error::{HandlerError, HandlerResult};
pub use event_bus::{DeliveryResult, EventBus, HandlerFailure, SubscriptionId, WeakEventBus};
