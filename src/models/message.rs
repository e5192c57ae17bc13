use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use super::geofence::Coordinates;

/// A position sample as delivered by the location source. Trackers emit
/// numeric fields as strings or floats depending on firmware, so both are
/// accepted.
#[derive(Debug, Deserialize)]
pub struct PositionMessage {
    #[serde(rename = "LATITUDE", default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(rename = "LONGITUDE", default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    #[serde(rename = "ACCURACY", default, deserialize_with = "parse_f64_option")]
    pub accuracy: Option<f64>,
    #[serde(rename = "GPS_DATETIME")]
    pub gps_datetime: Option<String>,
    #[serde(rename = "DEVICE_ID")]
    pub device_id: Option<String>,
    pub uuid: Option<String>,
}

impl PositionMessage {
    /// None when either coordinate is missing; the evaluation loop treats
    /// that as an unknown fix rather than an error.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        let raw = self.gps_datetime.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

fn parse_f64_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        String(String),
        Float(f64),
    }

    let v: Option<StringOrFloat> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOrFloat::Float(f)) => Ok(Some(f)),
        Some(StringOrFloat::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.parse::<f64>().map(Some).map_err(serde::de::Error::custom)
            }
        }
        None => Ok(None),
    }
}
