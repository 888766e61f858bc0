//! Wiring of the delivery handlers onto event buses.

use parcelbus_core::{DeliveryResult, EventBus};
use parcelbus_settings::BusTopology;

use crate::events::{DeliveryPayload, DeliveryStage, GLOBAL};
use crate::handlers::{driver_handler, global_handler, vendor_handler, ChangeLog};

/// The vendor, driver and global handlers, subscribed and ready.
///
/// With [`BusTopology::Split`] lifecycle events and the global status event
/// live on two separate buses; with [`BusTopology::Unified`] both accessors
/// return the same bus. Relays only hold weak handles to the status bus, so
/// dropping the network releases everything.
#[derive(Debug)]
pub struct DeliveryNetwork {
    lifecycle: EventBus<DeliveryPayload>,
    status: EventBus<DeliveryPayload>,
    topology: BusTopology,
    changes: ChangeLog,
}

impl DeliveryNetwork {
    /// Build the buses and subscribe every handler
    pub fn new(topology: BusTopology) -> Self {
        let lifecycle: EventBus<DeliveryPayload> = EventBus::new();
        let status = match topology {
            BusTopology::Split => EventBus::new(),
            BusTopology::Unified => lifecycle.clone(),
        };
        let changes = ChangeLog::new();

        lifecycle.subscribe(
            DeliveryStage::ToBePickedUp.event_name(),
            vendor_handler(status.downgrade()),
        );
        lifecycle.subscribe(
            DeliveryStage::InTransit.event_name(),
            driver_handler(status.downgrade()),
        );
        lifecycle.subscribe(
            DeliveryStage::Delivered.event_name(),
            driver_handler(status.downgrade()),
        );
        status.subscribe(GLOBAL, global_handler(changes.clone()));

        tracing::info!(%topology, "Delivery network wired");
        Self {
            lifecycle,
            status,
            topology,
            changes,
        }
    }

    /// Announce that a package reached `stage`
    pub fn publish(&self, stage: DeliveryStage, value: u32) -> DeliveryResult {
        self.lifecycle
            .emit(stage.event_name(), &stage.payload(value))
    }

    /// Bus the lifecycle events are published on
    pub fn lifecycle_bus(&self) -> &EventBus<DeliveryPayload> {
        &self.lifecycle
    }

    /// Bus the global status event is published on
    pub fn status_bus(&self) -> &EventBus<DeliveryPayload> {
        &self.status
    }

    pub fn topology(&self) -> BusTopology {
        self.topology
    }

    /// Changes recorded by the global observer
    pub fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    /// Unsubscribe everything from both buses
    pub fn close(&self) {
        self.lifecycle.close();
        if self.topology == BusTopology::Split {
            self.status.close();
        }
    }
}
