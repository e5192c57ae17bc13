mod appointments;
mod config;
mod dispatch;
mod geofence;
mod kafka;
mod models;
mod processor;

use config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Geofence Alerts Service...");

    // Load appointment snapshot
    let appointments = appointments::load_snapshot(&config.appointments_file)?;
    info!("Loaded {} appointment(s) from snapshot", appointments.len());

    // Start Kafka consumer with the log-backed delivery sink
    let sink = dispatch::LogSink;
    kafka::start_kafka_consumer(&config, appointments, &sink).await?;

    Ok(())
}
