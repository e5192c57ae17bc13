use crate::models::appointment::{Appointment, NotificationLevels};
use crate::models::geofence::{GeofenceStatus, NotificationIntent, ProximityLevel, Transition};

/// Title used for every proximity notification.
pub const NOTIFICATION_TITLE: &str = "Location Reminder";

/// Channel a tier is gated on. There is no inside toggle; an arrival rides
/// the near channel. Kept as an explicit table so the aliasing is auditable
/// in isolation.
fn effective_channel(level: ProximityLevel) -> ProximityLevel {
    match level {
        ProximityLevel::Far => ProximityLevel::Far,
        ProximityLevel::Medium => ProximityLevel::Medium,
        ProximityLevel::Near => ProximityLevel::Near,
        ProximityLevel::Inside => ProximityLevel::Near,
    }
}

fn channel_enabled(levels: NotificationLevels, channel: ProximityLevel) -> bool {
    match channel {
        ProximityLevel::Far => levels.far,
        ProximityLevel::Medium => levels.medium,
        ProximityLevel::Near | ProximityLevel::Inside => levels.near,
    }
}

/// Edge-triggered notification gate: fires only on a tier transition, and
/// only when the appointment's toggle for the effective channel is on. A
/// sustained stay in the same tier never re-fires.
pub fn decide(
    appointment: &Appointment,
    status: &GeofenceStatus,
    transition: &Transition,
) -> Option<NotificationIntent> {
    if !transition.changed {
        return None;
    }
    let channel = effective_channel(transition.current);
    if !channel_enabled(appointment.notification_levels, channel) {
        return None;
    }

    // An unknown fix reports an infinite distance; skip the meter count.
    let away = if status.distance.is_finite() {
        format!(" ({}m away)", status.distance.round())
    } else {
        String::new()
    };
    let body = match transition.current {
        ProximityLevel::Inside => format!("You've arrived at \"{}\"", appointment.title),
        ProximityLevel::Near => format!("You're approaching \"{}\"{}", appointment.title, away),
        ProximityLevel::Medium => {
            format!("You're getting close to \"{}\"{}", appointment.title, away)
        }
        ProximityLevel::Far => format!("You're heading toward \"{}\"{}", appointment.title, away),
    };

    Some(NotificationIntent {
        appointment_id: appointment.id,
        title: NOTIFICATION_TITLE.to_string(),
        body,
    })
}
