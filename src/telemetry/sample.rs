use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::state::SatelliteState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TelemetrySample {
    #[serde(rename = "time", deserialize_with = "deserialize_time")]
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub temperature: f64,
}

impl TelemetrySample {
    pub fn capture(state: &SatelliteState, timestamp: DateTime<Utc>) -> Self {
        TelemetrySample {
            timestamp,
            latitude: state.latitude,
            longitude: state.longitude,
            altitude: state.altitude,
            temperature: state.temperature,
        }
    }
}

/// Accepts RFC 3339 as well as offset-less ISO-8601, which is read as UTC.
fn deserialize_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_time(&s).map_err(serde::de::Error::custom)
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => s
            .parse::<NaiveDateTime>()
            .map(|naive| naive.and_utc())
            .map_err(|_| e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_time_field() {
        let sample = TelemetrySample {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            latitude: 36.4477,
            longitude: -119.4179,
            altitude: 1000.0,
            temperature: -10.0,
        };

        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["time"], "2024-05-01T12:00:00Z");
        assert_eq!(value["latitude"], 36.4477);
        assert_eq!(value["altitude"], 1000.0);
        assert!(value.get("timestamp").is_none());
    }

    #[test]
    fn reads_naive_timestamps_as_utc() {
        let json = r#"{"time": "2024-05-01T12:00:00.250000", "latitude": 1.0,
            "longitude": 2.0, "altitude": 3.0, "temperature": 4.0}"#;
        let sample: TelemetrySample = serde_json::from_str(json).unwrap();

        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(sample.timestamp, expected);
    }

    #[test]
    fn reads_offset_timestamps() {
        let json = r#"{"time": "2024-05-01T14:00:00+02:00", "latitude": 1.0,
            "longitude": 2.0, "altitude": 3.0, "temperature": 4.0}"#;
        let sample: TelemetrySample = serde_json::from_str(json).unwrap();
        assert_eq!(
            sample.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let json = r#"{"time": "yesterday", "latitude": 1.0,
            "longitude": 2.0, "altitude": 3.0, "temperature": 4.0}"#;
        assert!(serde_json::from_str::<TelemetrySample>(json).is_err());
    }
}
