//! Outcome of a single `emit` call.

use super::bus::SubscriptionId;
use crate::error::{HandlerError, HandlerResult};

/// A handler that failed during a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Registration whose handler failed.
    pub subscription: SubscriptionId,
    /// What went wrong.
    pub error: HandlerError,
}

impl std::fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.subscription, self.error)
    }
}

/// Summary of one `emit`: how many handlers ran and which of them failed.
///
/// Emitting to an event nobody listens to yields an empty, successful result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryResult {
    /// Number of handlers invoked, failed ones included.
    pub invoked: usize,
    /// Handlers that returned an error or panicked, in invocation order.
    pub failures: Vec<HandlerFailure>,
}

impl DeliveryResult {
    /// True when no handler failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when nothing was invoked
    pub fn is_empty(&self) -> bool {
        self.invoked == 0
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: DeliveryResult) {
        self.invoked += other.invoked;
        self.failures.extend(other.failures);
    }

    pub(crate) fn record(&mut self, subscription: SubscriptionId, outcome: HandlerResult) {
        self.invoked += 1;
        if let Err(error) = outcome {
            self.failures.push(HandlerFailure {
                subscription,
                error,
            });
        }
    }
}
