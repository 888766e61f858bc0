//! Delivery event names and payloads.
//!
//! Lifecycle stages are published under their human readable names; relays
//! normalize them into a single [`GLOBAL`] event carrying a [`StatusChange`].

use serde::{Deserialize, Serialize};

/// Name of the normalized status event every relay publishes to
pub const GLOBAL: &str = "global";

/// Stages a package goes through, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryStage {
    /// Waiting at the vendor
    ToBePickedUp,
    /// With a driver
    InTransit,
    /// Handed over to the recipient
    Delivered,
}

impl DeliveryStage {
    /// Every stage, in the order the producer emits them
    pub const ALL: [DeliveryStage; 3] = [
        DeliveryStage::ToBePickedUp,
        DeliveryStage::InTransit,
        DeliveryStage::Delivered,
    ];

    /// Event name the stage is published under
    pub fn event_name(self) -> &'static str {
        match self {
            DeliveryStage::ToBePickedUp => "to be picked up",
            DeliveryStage::InTransit => "in transit",
            DeliveryStage::Delivered => "delivered",
        }
    }

    /// Reverse of [`event_name`](Self::event_name)
    pub fn from_event_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.event_name() == name)
    }

    /// Payload announcing this stage with `value`
    pub fn payload(self, value: u32) -> DeliveryPayload {
        match self {
            DeliveryStage::ToBePickedUp => DeliveryPayload::ToBePickedUp(value),
            DeliveryStage::InTransit => DeliveryPayload::InTransit(value),
            DeliveryStage::Delivered => DeliveryPayload::Delivered(value),
        }
    }
}

impl std::fmt::Display for DeliveryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.event_name())
    }
}

/// A normalized state change, as seen by the global observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub stage: DeliveryStage,
    pub value: u32,
}

/// Everything that travels over the delivery buses.
///
/// Serializes externally tagged, so `ToBePickedUp(42)` becomes
/// `{"toBePickedUp":42}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryPayload {
    ToBePickedUp(u32),
    InTransit(u32),
    Delivered(u32),
    /// Published on [`GLOBAL`] by the relays
    Change(StatusChange),
}

impl DeliveryPayload {
    /// Lifecycle stage this payload belongs to
    pub fn stage(&self) -> DeliveryStage {
        match self {
            DeliveryPayload::ToBePickedUp(_) => DeliveryStage::ToBePickedUp,
            DeliveryPayload::InTransit(_) => DeliveryStage::InTransit,
            DeliveryPayload::Delivered(_) => DeliveryStage::Delivered,
            DeliveryPayload::Change(change) => change.stage,
        }
    }

    /// The numeric value carried by the payload
    pub fn value(&self) -> u32 {
        match self {
            DeliveryPayload::ToBePickedUp(value)
            | DeliveryPayload::InTransit(value)
            | DeliveryPayload::Delivered(value) => *value,
            DeliveryPayload::Change(change) => change.value,
        }
    }

    /// True for the normalized global payload
    pub fn is_change(&self) -> bool {
        matches!(self, DeliveryPayload::Change(_))
    }
}

impl std::fmt::Display for DeliveryPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}
