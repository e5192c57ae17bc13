use tracing::debug;

use crate::models::appointment::Appointment;
use crate::models::geofence::{Coordinates, NotificationIntent};

use super::classifier::check_geofence;
use super::decision::decide;
use super::tracker::GeofenceTracker;

/// One evaluation pass per position sample. Owns the tracker; callers must
/// serialize invocations so transition detection sees samples in arrival
/// order.
#[derive(Debug, Default)]
pub struct GeofenceEngine {
    tracker: GeofenceTracker,
}

impl GeofenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates a fix (or lack of one) against every active appointment and
    /// returns the notification intents produced, in appointment order.
    /// Inactive appointments are skipped entirely: no status is recorded and
    /// any stale entry is left untouched.
    pub fn evaluate(
        &mut self,
        location: Option<Coordinates>,
        appointments: &[Appointment],
    ) -> Vec<NotificationIntent> {
        let mut intents = Vec::new();

        for appointment in appointments.iter().filter(|a| a.is_active) {
            let status = check_geofence(location, appointment);
            let transition = self.tracker.update(status);

            if transition.changed {
                debug!(
                    appointment_id = %appointment.id,
                    distance = status.distance,
                    inside = status.is_inside,
                    "Tier transition {:?} -> {:?}",
                    transition.previous,
                    transition.current
                );
                if let Some(intent) = decide(appointment, &status, &transition) {
                    intents.push(intent);
                }
            }
        }

        intents
    }

    pub fn tracker(&self) -> &GeofenceTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut GeofenceTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::{AppointmentLocation, NotificationLevels};
    use crate::models::geofence::ProximityLevel;
    use chrono::Utc;
    use uuid::Uuid;

    const CENTER: Coordinates = Coordinates {
        latitude: 37.7749,
        longitude: -122.4194,
    };

    fn appointment(
        title: &str,
        radius: f64,
        active: bool,
        levels: NotificationLevels,
    ) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            title: title.to_string(),
            notes: None,
            date: Utc::now(),
            location: AppointmentLocation {
                latitude: CENTER.latitude,
                longitude: CENTER.longitude,
                address: None,
            },
            radius,
            is_active: active,
            color: None,
            notification_levels: levels,
        }
    }

    /// A fix the given number of meters due north of the geofence center.
    fn north_of_center(meters: f64) -> Coordinates {
        Coordinates {
            latitude: CENTER.latitude + meters / 111_194.9,
            longitude: CENTER.longitude,
        }
    }

    const ALL_ON: NotificationLevels = NotificationLevels {
        far: true,
        medium: true,
        near: true,
    };

    #[test]
    fn test_sustained_tier_fires_once() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![appointment("Dentist", 500.0, true, ALL_ON)];

        // far, far, far: first observation only.
        let fix = Some(north_of_center(5_000.0));
        assert_eq!(engine.evaluate(fix, &appts).len(), 1);
        assert_eq!(engine.evaluate(fix, &appts).len(), 0);
        assert_eq!(engine.evaluate(fix, &appts).len(), 0);
    }

    #[test]
    fn test_each_transition_fires_exactly_once() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![appointment("Dentist", 500.0, true, ALL_ON)];

        // Establish far, then walk far -> medium -> medium -> near.
        engine.evaluate(Some(north_of_center(5_000.0)), &appts);

        let mut produced = Vec::new();
        produced.extend(engine.evaluate(Some(north_of_center(1_200.0)), &appts));
        produced.extend(engine.evaluate(Some(north_of_center(1_100.0)), &appts));
        produced.extend(engine.evaluate(Some(north_of_center(700.0)), &appts));

        assert_eq!(produced.len(), 2);
        assert!(produced[0].body.contains("getting close"));
        assert!(produced[1].body.contains("approaching"));
    }

    #[test]
    fn test_gating_respected_but_transition_recorded() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![appointment(
            "Dentist",
            500.0,
            true,
            NotificationLevels {
                far: false,
                medium: false,
                near: true,
            },
        )];
        let id = appts[0].id;

        // First sighting lands on far: suppressed, yet the tier is recorded.
        assert!(engine.evaluate(Some(north_of_center(5_000.0)), &appts).is_empty());
        assert_eq!(
            engine.tracker().status(&id).unwrap().level,
            ProximityLevel::Far
        );

        // far -> near fires with the near-tier message.
        let intents = engine.evaluate(Some(north_of_center(700.0)), &appts);
        assert_eq!(intents.len(), 1);
        assert!(intents[0].body.starts_with("You're approaching"));
    }

    #[test]
    fn test_arrival_message_on_inside() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![appointment(
            "Dentist",
            500.0,
            true,
            NotificationLevels {
                far: false,
                medium: false,
                near: true,
            },
        )];

        engine.evaluate(Some(north_of_center(1_200.0)), &appts);
        let intents = engine.evaluate(Some(CENTER), &appts);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].body, "You've arrived at \"Dentist\"");
    }

    #[test]
    fn test_inactive_appointments_are_skipped() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![appointment("Dentist", 500.0, false, ALL_ON)];
        let id = appts[0].id;

        assert!(engine.evaluate(Some(CENTER), &appts).is_empty());
        assert!(engine.tracker().status(&id).is_none());
    }

    #[test]
    fn test_intents_follow_appointment_order() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![
            appointment("First", 500.0, true, ALL_ON),
            appointment("Second", 800.0, true, ALL_ON),
        ];

        let intents = engine.evaluate(Some(CENTER), &appts);
        assert_eq!(intents.len(), 2);
        assert_eq!(intents[0].appointment_id, appts[0].id);
        assert_eq!(intents[1].appointment_id, appts[1].id);
    }

    #[test]
    fn test_missing_fix_degrades_to_far() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![appointment("Dentist", 500.0, true, ALL_ON)];
        let id = appts[0].id;

        // No fix: first sighting is far at infinite distance.
        let intents = engine.evaluate(None, &appts);
        assert_eq!(intents.len(), 1);
        let status = engine.tracker().status(&id).unwrap();
        assert_eq!(status.level, ProximityLevel::Far);
        assert_eq!(status.distance, f64::INFINITY);

        // Still no fix: already far, no transition, no intent.
        assert!(engine.evaluate(None, &appts).is_empty());
    }

    #[test]
    fn test_tracker_pruning_via_engine() {
        let mut engine = GeofenceEngine::new();
        let appts = vec![appointment("Dentist", 500.0, true, ALL_ON)];
        let id = appts[0].id;

        engine.evaluate(Some(CENTER), &appts);
        engine.tracker_mut().remove(&id);
        assert!(engine.tracker().is_empty());

        // Re-observation is a first sighting again.
        assert_eq!(engine.evaluate(Some(CENTER), &appts).len(), 1);
    }
}
