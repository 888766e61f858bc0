//! Periodic producer of lifecycle events.
//!
//! Every tick publishes each [`DeliveryStage`] once, in order, with a random
//! value. The bus does not care about the cadence; the producer owns it.

use anyhow::Context;
use parcelbus_core::DeliveryResult;
use parcelbus_settings::ProducerSettings;
use rand::Rng;
use std::time::Duration;
use tokio::time::{self, Instant};

use crate::events::DeliveryStage;
use crate::network::DeliveryNetwork;

/// What one tick published and how delivery went
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    /// Stages published, with their values
    pub published: Vec<(DeliveryStage, u32)>,
    /// Combined result of the top-level emits
    pub result: DeliveryResult,
}

/// Drives a [`DeliveryNetwork`] on a fixed interval
#[derive(Debug)]
pub struct Producer {
    network: DeliveryNetwork,
    settings: ProducerSettings,
    ticks_done: u64,
}

impl Producer {
    pub fn new(network: DeliveryNetwork, settings: ProducerSettings) -> Self {
        Self {
            network,
            settings,
            ticks_done: 0,
        }
    }

    pub fn network(&self) -> &DeliveryNetwork {
        &self.network
    }

    /// Ticks completed so far
    pub fn ticks_done(&self) -> u64 {
        self.ticks_done
    }

    /// Publish every stage once with random values in `0..max_value`
    pub fn tick(&mut self) -> TickReport {
        let max_value = self.settings.max_value.max(1);
        let mut rng = rand::rng();
        self.tick_with(|_| rng.random_range(0..max_value))
    }

    /// Publish every stage once, asking `value_for` for each value
    pub fn tick_with<F>(&mut self, mut value_for: F) -> TickReport
    where
        F: FnMut(DeliveryStage) -> u32,
    {
        self.ticks_done += 1;
        let mut report = TickReport {
            tick: self.ticks_done,
            ..TickReport::default()
        };

        for stage in DeliveryStage::ALL {
            let value = value_for(stage);
            report.published.push((stage, value));
            report.result.merge(self.network.publish(stage, value));
        }

        for failure in &report.result.failures {
            tracing::warn!(tick = report.tick, %failure, "Delivery handler failed");
        }
        report
    }

    /// Tick every `interval_ms` until the configured tick limit is reached or
    /// Ctrl-C is received. Returns the number of ticks completed.
    pub async fn run(&mut self) -> anyhow::Result<u64> {
        let period = Duration::from_millis(self.settings.interval_ms.max(1));
        let mut interval = time::interval_at(Instant::now() + period, period);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        tracing::info!(
            interval_ms = self.settings.interval_ms,
            ticks = ?self.settings.ticks,
            "Producer started"
        );

        while !self.limit_reached() {
            tokio::select! {
                _ = interval.tick() => {
                    let report = self.tick();
                    tracing::debug!(
                        tick = report.tick,
                        invoked = report.result.invoked,
                        failures = report.result.failures.len(),
                        "Tick complete"
                    );
                }
                signal = &mut shutdown => {
                    signal.context("listening for Ctrl-C")?;
                    tracing::info!("Interrupted, stopping producer");
                    break;
                }
            }
        }

        tracing::info!(ticks = self.ticks_done, "Producer stopped");
        Ok(self.ticks_done)
    }

    fn limit_reached(&self) -> bool {
        self.settings
            .ticks
            .is_some_and(|limit| self.ticks_done >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelbus_settings::BusTopology;

    fn producer(max_value: u32, ticks: Option<u64>) -> Producer {
        Producer::new(
            DeliveryNetwork::new(BusTopology::Split),
            ProducerSettings {
                interval_ms: 1,
                max_value,
                ticks,
            },
        )
    }

    #[test]
    fn test_tick_publishes_every_stage_in_order() {
        let mut producer = producer(100, None);
        let report = producer.tick_with(|stage| match stage {
            DeliveryStage::ToBePickedUp => 1,
            DeliveryStage::InTransit => 2,
            DeliveryStage::Delivered => 3,
        });

        assert_eq!(report.tick, 1);
        assert_eq!(
            report.published,
            vec![
                (DeliveryStage::ToBePickedUp, 1),
                (DeliveryStage::InTransit, 2),
                (DeliveryStage::Delivered, 3),
            ]
        );
        assert_eq!(report.result.invoked, 3);
        assert!(report.result.is_success());
        assert_eq!(producer.network().changes().len(), 3);
    }

    #[test]
    fn test_random_values_stay_in_range() {
        let mut producer = producer(5, None);
        for _ in 0..20 {
            let report = producer.tick();
            assert!(report.published.iter().all(|(_, value)| *value < 5));
        }
        assert_eq!(producer.ticks_done(), 20);
    }

    #[tokio::test]
    async fn test_run_stops_at_tick_limit() {
        let mut producer = producer(100, Some(3));
        let ticks = producer.run().await.unwrap();

        assert_eq!(ticks, 3);
        assert_eq!(producer.network().changes().len(), 9);
    }

    #[tokio::test]
    async fn test_run_with_zero_ticks_returns_immediately() {
        let mut producer = producer(100, Some(0));
        assert_eq!(producer.run().await.unwrap(), 0);
        assert!(producer.network().changes().is_empty());
    }
}
