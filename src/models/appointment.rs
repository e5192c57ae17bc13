use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::geofence::Coordinates;

/// An appointment geofence as supplied by the external repository.
/// The engine only reads id, title, location, radius, is_active and
/// notification_levels; the rest is carried through from the snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct Appointment {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub location: AppointmentLocation,
    /// Geofence radius in meters. Validated > 0 at snapshot load.
    pub radius: f64,
    pub is_active: bool,
    #[serde(default)]
    pub color: Option<String>,
    pub notification_levels: NotificationLevels,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct AppointmentLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
}

/// Per-tier notification toggles. There is no inside flag; an arrival
/// notification is gated by `near`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NotificationLevels {
    pub far: bool,
    pub medium: bool,
    pub near: bool,
}

impl Appointment {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.location.latitude,
            longitude: self.location.longitude,
        }
    }
}
