//! Domain handlers
//!
//! Vendor and driver handlers listen to lifecycle events and relay them to
//! the status bus as a [`StatusChange`] under [`GLOBAL`]. The global handler
//! is the terminal observer: it records the change and never emits.

use anyhow::{anyhow, ensure};
use parcelbus_core::WeakEventBus;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::events::{DeliveryPayload, DeliveryStage, StatusChange, GLOBAL};

/// Changes seen by the global observer, in arrival order
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Arc<Mutex<Vec<StatusChange>>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, change: StatusChange) {
        self.entries.lock().push(change);
    }

    /// Copy of every recorded change
    pub fn snapshot(&self) -> Vec<StatusChange> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Most recent change for `stage`
    pub fn latest(&self, stage: DeliveryStage) -> Option<StatusChange> {
        self.entries
            .lock()
            .iter()
            .rev()
            .find(|change| change.stage == stage)
            .copied()
    }
}

/// Relays "to be picked up" to the status bus
pub fn vendor_handler(
    status: WeakEventBus<DeliveryPayload>,
) -> impl Fn(&DeliveryPayload) -> anyhow::Result<()> + Send + Sync + 'static {
    relay("vendor", &[DeliveryStage::ToBePickedUp], status)
}

/// Relays "in transit" and "delivered" to the status bus
pub fn driver_handler(
    status: WeakEventBus<DeliveryPayload>,
) -> impl Fn(&DeliveryPayload) -> anyhow::Result<()> + Send + Sync + 'static {
    relay(
        "driver",
        &[DeliveryStage::InTransit, DeliveryStage::Delivered],
        status,
    )
}

fn relay(
    role: &'static str,
    accepts: &'static [DeliveryStage],
    status: WeakEventBus<DeliveryPayload>,
) -> impl Fn(&DeliveryPayload) -> anyhow::Result<()> + Send + Sync + 'static {
    move |payload: &DeliveryPayload| {
        ensure!(
            !payload.is_change(),
            "{role} handler cannot relay a status change: {payload}"
        );
        let stage = payload.stage();
        ensure!(
            accepts.contains(&stage),
            "{role} handler does not handle '{stage}'"
        );

        let bus = status
            .upgrade()
            .ok_or_else(|| anyhow!("status bus is gone, {role} handler cannot relay"))?;
        let change = StatusChange {
            stage,
            value: payload.value(),
        };
        let result = bus.emit(GLOBAL, &DeliveryPayload::Change(change));
        for failure in &result.failures {
            tracing::warn!(role, %failure, "Status observer failed");
        }
        tracing::debug!(role, %stage, value = change.value, observers = result.invoked, "Relayed");
        Ok(())
    }
}

/// Terminal observer for the global status event
pub fn global_handler(
    changes: ChangeLog,
) -> impl Fn(&DeliveryPayload) -> anyhow::Result<()> + Send + Sync + 'static {
    move |payload: &DeliveryPayload| {
        let DeliveryPayload::Change(change) = payload else {
            return Err(anyhow!("global handler expects a status change, got {payload}"));
        };
        changes.record(*change);
        tracing::info!(stage = %change.stage, value = change.value, "Change occurred: {payload}");
        Ok(())
    }
}
