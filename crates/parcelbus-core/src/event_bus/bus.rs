//! Event Bus implementation.
//!
//! Provides the core EventBus struct: a registry of named events, each with an
//! ordered list of handlers, and a synchronous depth-first dispatcher.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use uuid::Uuid;

use super::delivery::DeliveryResult;
use crate::error::{HandlerError, HandlerResult};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type alias for event handler functions
type EventHandler<P> = Arc<dyn Fn(&P) -> anyhow::Result<()> + Send + Sync>;

struct Registration<P> {
    id: SubscriptionId,
    handler: EventHandler<P>,
}

impl<P> Clone for Registration<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Handler lists are copy-on-write: `emit` clones the `Arc` as its snapshot,
/// and a later subscribe/unsubscribe copies the list instead of mutating the
/// one a dispatch is iterating.
struct Registry<P> {
    by_event: HashMap<String, Arc<Vec<Registration<P>>>>,
    owners: HashMap<SubscriptionId, String>,
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self {
            by_event: HashMap::new(),
            owners: HashMap::new(),
        }
    }
}

/// Named-event bus carrying payloads of type `P`.
///
/// Cloning is cheap and every clone shares the same registry. Handlers are
/// invoked on the emitting thread, in registration order, and may themselves
/// subscribe, unsubscribe or emit on the same bus.
///
/// A handler graph that keeps re-emitting into itself recurses without bound;
/// the bus does not detect cycles.
pub struct EventBus<P> {
    registry: Arc<RwLock<Registry<P>>>,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P> EventBus<P> {
    /// Create a new, empty event bus
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
        }
    }

    /// Subscribe `handler` to the event called `name`
    ///
    /// Any string is a valid event name. Subscribing the same handler twice
    /// registers it twice, and it will run once per registration.
    pub fn subscribe<F>(&self, name: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: Fn(&P) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        let id = SubscriptionId::new();
        let mut registry = self.registry.write();
        let handlers = registry.by_event.entry(name.clone()).or_default();
        Arc::make_mut(handlers).push(Registration {
            id,
            handler: Arc::new(handler),
        });
        tracing::debug!(event = %name, "Subscription {} added", id);
        registry.owners.insert(id, name);
        id
    }

    /// Remove exactly the registration identified by `id`
    ///
    /// Returns true if the subscription was found and removed. Removing an
    /// unknown or already removed id does nothing.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.write();
        let Some(name) = registry.owners.remove(&id) else {
            return false;
        };

        let mut removed = None;
        let mut now_empty = false;
        if let Some(handlers) = registry.by_event.get_mut(&name) {
            if let Some(index) = handlers.iter().position(|r| r.id == id) {
                removed = Some(Arc::make_mut(handlers).remove(index));
            }
            now_empty = handlers.is_empty();
        }
        let emptied = if now_empty {
            registry.by_event.remove(&name)
        } else {
            None
        };
        drop(registry);

        // The handler may own things that call back into the bus on drop
        drop(removed);
        drop(emptied);

        tracing::debug!(event = %name, "Subscription {} removed", id);
        true
    }

    /// Deliver `payload` to every handler subscribed to `name`
    ///
    /// The handler list is captured when the call starts: registrations added
    /// or removed while this dispatch runs only affect later emits. Nested
    /// emits made by a handler complete before the next handler is invoked.
    /// A handler that returns an error or panics is recorded in the result and
    /// the remaining handlers still run.
    pub fn emit(&self, name: &str, payload: &P) -> DeliveryResult {
        let snapshot = self.registry.read().by_event.get(name).cloned();
        let Some(snapshot) = snapshot else {
            return DeliveryResult::default();
        };

        tracing::trace!(event = name, handlers = snapshot.len(), "Dispatching");
        let mut result = DeliveryResult::default();
        for registration in snapshot.iter() {
            result.record(registration.id, invoke(&registration.handler, payload));
        }
        result
    }

    /// Number of handlers registered for `name`
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.registry
            .read()
            .by_event
            .get(name)
            .map_or(0, |handlers| handlers.len())
    }

    /// Check whether anything listens to `name`
    pub fn has_subscribers(&self, name: &str) -> bool {
        self.subscriber_count(name) > 0
    }

    /// Get the number of active subscriptions across all events
    pub fn total_subscriptions(&self) -> usize {
        self.registry.read().owners.len()
    }

    /// Names that currently have at least one handler, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.read().by_event.keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every registration
    ///
    /// Dispatches already in progress finish with their snapshot. The bus can
    /// be subscribed to again afterwards.
    pub fn close(&self) {
        let mut registry = self.registry.write();
        let by_event = std::mem::take(&mut registry.by_event);
        let owners = std::mem::take(&mut registry.owners);
        drop(registry);

        let dropped = owners.len();
        drop(by_event);
        tracing::debug!("Event bus closed, {} subscriptions dropped", dropped);
    }

    /// Non-owning handle, for handlers that need to emit on the bus they are
    /// registered with without keeping it alive
    pub fn downgrade(&self) -> WeakEventBus<P> {
        WeakEventBus {
            registry: Arc::downgrade(&self.registry),
        }
    }
}

fn invoke<P>(handler: &EventHandler<P>, payload: &P) -> HandlerResult {
    match panic::catch_unwind(AssertUnwindSafe(|| handler(payload))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(HandlerError::failed(&err)),
        Err(panic) => Err(HandlerError::from_panic(panic)),
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.event_names())
            .field("subscribers", &self.total_subscriptions())
            .finish()
    }
}

/// Weak reference to an [`EventBus`]
pub struct WeakEventBus<P> {
    registry: Weak<RwLock<Registry<P>>>,
}

impl<P> WeakEventBus<P> {
    /// Get the bus back if it is still alive
    pub fn upgrade(&self) -> Option<EventBus<P>> {
        self.registry.upgrade().map(|registry| EventBus { registry })
    }
}

impl<P> Clone for WeakEventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Weak::clone(&self.registry),
        }
    }
}

impl<P> std::fmt::Debug for WeakEventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakEventBus")
            .field("alive", &(self.registry.strong_count() > 0))
            .finish()
    }
}
