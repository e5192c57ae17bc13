use crate::config::AppConfig;
use crate::dispatch::NotificationSink;
use crate::geofence::engine::GeofenceEngine;
use crate::models::appointment::Appointment;
use crate::processor::position_processor;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use std::time::Duration;
use tracing::{error, info, warn};

/// Starts the Kafka consumer with SASL/SCRAM authentication and a circuit
/// breaker mechanism. Payloads are evaluated inline rather than in spawned
/// tasks: tier-transition detection is order-sensitive, so each sample must
/// complete a full evaluation pass before the next one starts.
pub async fn start_kafka_consumer(
    config: &AppConfig,
    appointments: Vec<Appointment>,
    sink: &dyn NotificationSink,
) -> anyhow::Result<()> {
    info!("Initializing Kafka consumer for topic: {}", config.kafka_topic);

    let mut client_config = ClientConfig::new();
    client_config
        .set("bootstrap.servers", &config.kafka_bootstrap_servers)
        .set("group.id", &config.kafka_group_id)
        .set("auto.offset.reset", &config.kafka_auto_offset_reset)
        // SASL Configuration
        .set("security.protocol", &config.kafka_security_protocol)
        .set("sasl.mechanism", &config.kafka_sasl_mechanism)
        .set("sasl.username", &config.kafka_username)
        .set("sasl.password", &config.kafka_password);

    // Create the consumer
    let consumer: StreamConsumer = client_config.create()?;

    consumer.subscribe(&[&config.kafka_topic])?;
    info!("Subscribed to topic: {}", config.kafka_topic);

    // The engine is exclusively owned by this loop.
    let mut engine = GeofenceEngine::new();
    let mut consecutive_failures = 0;
    let max_retries = config.kafka_max_retries;
    let cooldown_duration = Duration::from_secs(config.kafka_circuit_breaker_cooldown);

    loop {
        // Circuit Breaker Check
        if consecutive_failures >= max_retries {
            warn!(
                "Circuit breaker tripped ({} consecutive failures)! Sleeping for {} seconds...",
                consecutive_failures, config.kafka_circuit_breaker_cooldown
            );
            tokio::time::sleep(cooldown_duration).await;
            consecutive_failures = 0;
            info!("Circuit breaker reset. Resuming consumption.");
        }

        match consumer.recv().await {
            Ok(m) => {
                // Success: Reset failure counter
                consecutive_failures = 0;

                let payload = match m.payload() {
                    None => {
                        warn!("Received empty payload from Kafka");
                        continue;
                    }
                    Some(p) => p,
                };

                match position_processor::process_position(&mut engine, &appointments, payload) {
                    Ok(intents) => {
                        for intent in &intents {
                            if let Err(e) = sink.deliver(intent).await {
                                error!("Error delivering notification intent: {}", e);
                            }
                        }
                    }
                    Err(e) => {
                        error!("Error processing position sample: {}", e);
                    }
                }
            }
            Err(e) => {
                error!(
                    "Kafka error: {}. Incrementing failure count ({} / {})",
                    e,
                    consecutive_failures + 1,
                    max_retries
                );
                consecutive_failures += 1;

                // Small delay to prevent tight loop in case of minor network glitches
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }
}
