pub mod appointment;
pub mod geofence;
pub mod message;
