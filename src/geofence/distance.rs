use crate::models::geofence::Coordinates;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points (haversine).
/// Total over finite coordinates; identical points give exactly 0.
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Distance from an optional fix to a target. No fix means unknown,
/// reported as +Infinity so downstream classification lands on Far.
pub fn distance_from(location: Option<Coordinates>, target: Coordinates) -> f64 {
    match location {
        Some(point) => distance(point, target),
        None => f64::INFINITY,
    }
}
