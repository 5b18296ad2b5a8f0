use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Strictly increasing in insertion order.
pub type ObservationId = i64;

/// One submitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

/// Extract the bare values of a snapshot, preserving order.
pub fn values_of(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.value).collect()
}

/// Format a timestamp the way it is written to the `created_at` column.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a `created_at` column value.
///
/// Accepts RFC 3339 and offset-less ISO-8601 (read as UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SubsecRound, TimeZone, Timelike};

    #[test]
    fn test_timestamp_round_trip() {
        let ts = Utc::now().trunc_subsecs(6);
        let parsed = parse_timestamp(&format_timestamp(&ts)).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn test_parse_naive_iso_as_utc() {
        let parsed = parse_timestamp("2024-03-05T09:15:30.123456").unwrap();
        assert_eq!(
            parsed.trunc_subsecs(0),
            Utc.with_ymd_and_hms(2024, 3, 5, 9, 15, 30).unwrap()
        );
        assert_eq!(parsed.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_values_of_keeps_order() {
        let now = Utc::now();
        let obs = vec![
            Observation { id: 1, value: 3.0, created_at: now },
            Observation { id: 2, value: 1.0, created_at: now },
        ];
        assert_eq!(values_of(&obs), vec![3.0, 1.0]);
    }

    #[test]
    fn test_observation_serde() {
        let obs = Observation { id: 7, value: 7.5, created_at: Utc::now() };
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
    }
}
