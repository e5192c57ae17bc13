use std::collections::HashMap;

use uuid::Uuid;

use crate::models::geofence::{GeofenceStatus, Transition};

/// Session-scoped store of the last computed status per appointment.
/// Owned by exactly one evaluation loop; nothing here persists across
/// restarts, so a restart re-derives first-observation state.
#[derive(Debug, Default)]
pub struct GeofenceTracker {
    statuses: HashMap<Uuid, GeofenceStatus>,
}

impl GeofenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `status`, fully replacing any previous entry for the same
    /// appointment, and reports whether the tier changed. A first
    /// observation always counts as changed so a freshly created or
    /// reactivated appointment can alert immediately.
    pub fn update(&mut self, status: GeofenceStatus) -> Transition {
        let previous = self
            .statuses
            .insert(status.appointment_id, status)
            .map(|prior| prior.level);
        Transition {
            previous,
            current: status.level,
            changed: previous != Some(status.level),
        }
    }

    pub fn status(&self, appointment_id: &Uuid) -> Option<&GeofenceStatus> {
        self.statuses.get(appointment_id)
    }

    /// Drops the entry for a deleted or deactivated appointment. The
    /// tracker does not own appointment lifecycle; pruning is the caller's
    /// call.
    pub fn remove(&mut self, appointment_id: &Uuid) -> Option<GeofenceStatus> {
        self.statuses.remove(appointment_id)
    }

    /// Keeps only the entries the caller still tracks.
    pub fn retain(&mut self, mut keep: impl FnMut(&Uuid) -> bool) {
        self.statuses.retain(|id, _| keep(id));
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
