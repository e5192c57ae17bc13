use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A WGS-84 point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Proximity tier, ordered farthest to closest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProximityLevel {
    Far,
    Medium,
    Near,
    Inside,
}

/// Snapshot of where the user stands relative to one appointment's geofence.
/// Recomputed on every position sample; `distance` is +Infinity when no fix
/// is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceStatus {
    pub appointment_id: Uuid,
    pub distance: f64,
    pub is_inside: bool,
    pub level: ProximityLevel,
}

/// Result of recording a status in the tracker. `previous` is None on the
/// first observation of an appointment, which counts as changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub previous: Option<ProximityLevel>,
    pub current: ProximityLevel,
    pub changed: bool,
}

/// A notification to be delivered, decoupled from actual delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationIntent {
    pub appointment_id: Uuid,
    pub title: String,
    pub body: String,
}
