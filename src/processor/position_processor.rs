use tracing::{debug, info, warn};

use crate::geofence::engine::GeofenceEngine;
use crate::models::appointment::Appointment;
use crate::models::geofence::NotificationIntent;
use crate::models::message::PositionMessage;

/// Runs one evaluation pass for a raw position payload. Malformed payloads
/// are logged and skipped; the loop must survive anything the source emits.
pub fn process_position(
    engine: &mut GeofenceEngine,
    appointments: &[Appointment],
    payload: &[u8],
) -> anyhow::Result<Vec<NotificationIntent>> {
    // 1. Parse JSON
    let message: PositionMessage = match serde_json::from_slice(payload) {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to parse position message: {}", e);
            return Ok(Vec::new());
        }
    };

    debug!(
        device_id = message.device_id.as_deref().unwrap_or("unknown"),
        uuid = message.uuid.as_deref().unwrap_or(""),
        accuracy = ?message.accuracy,
        recorded_at = ?message.recorded_at(),
        "Processing position sample"
    );

    // 2. Extract fix; a missing coordinate evaluates as an unknown fix.
    let location = message.coordinates();
    if location.is_none() {
        warn!("Position message has no usable coordinates, treating fix as unknown");
    }

    // 3. Evaluate against every active appointment.
    let intents = engine.evaluate(location, appointments);
    if !intents.is_empty() {
        info!("Produced {} notification intent(s)", intents.len());
    }

    Ok(intents)
}
