use clap::Parser;
use parcelbus::cli::Cli;
use parcelbus::{init_logging, DeliveryNetwork, Producer, BUILD_DATE, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_logging(&config.logging)?;
    tracing::info!(version = VERSION, built = BUILD_DATE, "Starting parcelbus");

    let network = DeliveryNetwork::new(config.bus.topology);
    let mut producer = Producer::new(network, config.producer);
    let ticks = producer.run().await?;

    let network = producer.network();
    tracing::info!(
        ticks,
        changes = network.changes().len(),
        "Delivery simulation finished"
    );
    network.close();

    Ok(())
}
