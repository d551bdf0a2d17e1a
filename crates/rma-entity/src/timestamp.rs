//! Lenient timestamp (de)serialization for store records.
//!
//! Stored timestamps are ISO-8601 strings written by several clients. A
//! value that cannot be parsed is treated as absent rather than failing the
//! whole record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Parse an ISO-8601 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Deserialize an optional timestamp, mapping garbage to `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => parse(&s),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert!(parse("2025-01-02T10:00:00.000Z").is_some());
        assert!(parse("2025-01-02T10:00:00+02:00").is_some());
        assert_eq!(
            parse("2025-01-02").map(|d| d.to_rfc3339()),
            Some("2025-01-02T00:00:00+00:00".to_string())
        );
        assert!(parse("").is_none());
        assert!(parse("yesterday").is_none());
    }
}
