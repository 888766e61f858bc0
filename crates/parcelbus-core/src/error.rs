//! Error handling for the parcelbus event bus
//!
//! The bus itself never fails: unknown event names and stale subscription ids
//! are accepted silently. The only error the bus knows about is a handler that
//! failed while being invoked, which is captured as a [`HandlerError`] and
//! reported through [`DeliveryResult`](crate::event_bus::DeliveryResult)
//! instead of being propagated to the emitter.

use std::any::Any;
use thiserror::Error;

/// A handler failed during an `emit`.
///
/// Failures are isolated per handler; sibling handlers in the same dispatch
/// still run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler returned an error
    #[error("Handler failed: {0}")]
    Failed(String),

    /// The handler panicked
    #[error("Handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    /// Build from an error returned by a handler, keeping its context chain.
    pub fn failed(err: &anyhow::Error) -> Self {
        HandlerError::Failed(format!("{err:#}"))
    }

    /// Build from the payload of a caught panic.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "non-string panic payload".to_string()
        };
        HandlerError::Panicked(message)
    }

    /// Check if the handler panicked rather than returning an error
    pub fn is_panic(&self) -> bool {
        matches!(self, HandlerError::Panicked(_))
    }

    /// The message carried by the error
    pub fn message(&self) -> &str {
        match self {
            HandlerError::Failed(msg) | HandlerError::Panicked(msg) => msg,
        }
    }
}

/// Result type for handler invocations
pub type HandlerResult = std::result::Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_keeps_context_chain() {
        let err = anyhow::anyhow!("disk full").context("writing manifest");
        let handler_err = HandlerError::failed(&err);
        assert_eq!(handler_err.message(), "writing manifest: disk full");
        assert!(!handler_err.is_panic());
    }

    #[test]
    fn test_from_panic_payloads() {
        let err = HandlerError::from_panic(Box::new("boom"));
        assert_eq!(err, HandlerError::Panicked("boom".to_string()));

        let err = HandlerError::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(err.message(), "owned boom");
        assert!(err.is_panic());

        let err = HandlerError::from_panic(Box::new(7_u8));
        assert_eq!(err.message(), "non-string panic payload");
    }

    #[test]
    fn test_display() {
        let err = HandlerError::Failed("bad payload".to_string());
        assert_eq!(err.to_string(), "Handler failed: bad payload");

        let err = HandlerError::Panicked("boom".to_string());
        assert_eq!(err.to_string(), "Handler panicked: boom");
    }
}
