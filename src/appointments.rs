use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::appointment::Appointment;

/// Loads the appointment snapshot from a JSON file. Appointment ownership
/// and persistence live outside this service; this is a read-only view
/// taken at startup.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<Appointment>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading appointments file {}", path.display()))?;
    let parsed: Vec<Appointment> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing appointments file {}", path.display()))?;
    Ok(validate(parsed))
}

/// Drops entries that can never evaluate sanely. Radius and coordinates are
/// checked here once, not on every evaluation pass.
fn validate(appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments
        .into_iter()
        .filter(|appointment| {
            if !appointment.location.latitude.is_finite()
                || !appointment.location.longitude.is_finite()
            {
                warn!(
                    "Skipping appointment {} (\"{}\"): non-finite coordinates",
                    appointment.id, appointment.title
                );
                return false;
            }
            if !appointment.radius.is_finite() || appointment.radius <= 0.0 {
                warn!(
                    "Skipping appointment {} (\"{}\"): invalid radius {}",
                    appointment.id, appointment.title, appointment.radius
                );
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r##"
    [
        {
            "id": "7f1f79a2-4138-4f61-a26c-9a46ef9a1b14",
            "title": "Dentist",
            "notes": "Bring insurance card",
            "date": "2026-09-01T15:00:00.000Z",
            "location": {
                "latitude": 37.7749,
                "longitude": -122.4194,
                "address": "450 Sutter St, San Francisco"
            },
            "radius": 500,
            "isActive": true,
            "color": "#3478F6",
            "notificationLevels": { "far": false, "medium": true, "near": true }
        },
        {
            "id": "0cfb2fd4-35b1-4f0e-9f13-37e06fb2b6a8",
            "title": "Broken",
            "date": "2026-09-01T15:00:00Z",
            "location": { "latitude": 37.0, "longitude": -122.0 },
            "radius": -10,
            "isActive": true,
            "notificationLevels": { "far": true, "medium": true, "near": true }
        }
    ]
    "##;

    #[test]
    fn test_snapshot_parses_and_filters_invalid_radius() {
        let parsed: Vec<Appointment> = serde_json::from_str(SNAPSHOT).unwrap();
        let valid = validate(parsed);
        assert_eq!(valid.len(), 1);

        let appt = &valid[0];
        assert_eq!(appt.title, "Dentist");
        assert_eq!(appt.radius, 500.0);
        assert!(appt.is_active);
        assert!(!appt.notification_levels.far);
        assert!(appt.notification_levels.near);
        assert_eq!(appt.location.address.as_deref(), Some("450 Sutter St, San Francisco"));
        assert_eq!(appt.coordinates().latitude, 37.7749);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_snapshot("/nonexistent/appointments.json").is_err());
    }
}
