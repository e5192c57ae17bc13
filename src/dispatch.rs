use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::models::geofence::NotificationIntent;

/// Delivery boundary for notification intents. The engine only produces
/// intents; surfacing an actual system notification belongs to the host.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<()>;
}

/// Sink that surfaces intents through the log stream.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<()> {
        info!(
            appointment_id = %intent.appointment_id,
            "{}: {}",
            intent.title,
            intent.body
        );
        Ok(())
    }
}
