use crate::models::appointment::Appointment;
use crate::models::geofence::{Coordinates, GeofenceStatus, ProximityLevel};

use super::distance::distance_from;

/// Tier thresholds scale with each appointment's own radius so that a tight
/// 50 m reminder and a loose 5 km reminder get the same three-ring warning
/// structure. Fixed constants; per-appointment multipliers are a possible
/// future knob.
const NEAR_MULTIPLIER: f64 = 1.5;
const MEDIUM_MULTIPLIER: f64 = 3.0;

/// First match wins, boundaries inclusive on the nearer tier. A radius of
/// zero or less degenerates (only a zero distance can classify Inside) but
/// stays total.
pub fn classify(distance: f64, radius: f64) -> ProximityLevel {
    if distance <= radius {
        ProximityLevel::Inside
    } else if distance <= radius * NEAR_MULTIPLIER {
        ProximityLevel::Near
    } else if distance <= radius * MEDIUM_MULTIPLIER {
        ProximityLevel::Medium
    } else {
        ProximityLevel::Far
    }
}

/// Full status for one appointment at the given fix.
pub fn check_geofence(location: Option<Coordinates>, appointment: &Appointment) -> GeofenceStatus {
    let distance = distance_from(location, appointment.coordinates());
    GeofenceStatus {
        appointment_id: appointment.id,
        distance,
        is_inside: distance <= appointment.radius,
        level: classify(distance, appointment.radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_inclusivity() {
        let r = 500.0;
        assert_eq!(classify(0.0, r), ProximityLevel::Inside);
        assert_eq!(classify(r, r), ProximityLevel::Inside);
        assert_eq!(classify(r * 1.5, r), ProximityLevel::Near);
        assert_eq!(classify(r * 3.0, r), ProximityLevel::Medium);
        assert_eq!(classify(r * 3.0 + 0.001, r), ProximityLevel::Far);
    }

    #[test]
    fn test_monotonic_tiering() {
        let r = 200.0;
        let mut previous = ProximityLevel::Inside;
        for step in 0..100 {
            let level = classify(step as f64 * 10.0, r);
            assert!(level <= previous, "tier moved inward as distance grew");
            previous = level;
        }
    }

    #[test]
    fn test_degenerate_radius() {
        assert_eq!(classify(0.0, 0.0), ProximityLevel::Inside);
        assert_eq!(classify(0.001, 0.0), ProximityLevel::Far);
        assert_eq!(classify(100.0, -5.0), ProximityLevel::Far);
    }

    #[test]
    fn test_infinite_distance_is_far() {
        assert_eq!(classify(f64::INFINITY, 5_000.0), ProximityLevel::Far);
    }
}
