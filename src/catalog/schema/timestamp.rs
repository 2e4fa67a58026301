use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Table creation instant, always normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Accepts RFC 3339 (`2024-01-15T10:30:00Z`), ISO-8601 date-times with a
    /// compact offset (`+0000`), minute precision or no offset at all, and
    /// bare dates. Values without an offset are read as UTC, bare dates as
    /// midnight UTC.
    pub fn parse(raw: &str) -> Result<Timestamp, String> {
        let raw = raw.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Timestamp(parsed.with_timezone(&Utc)));
        }

        if let Some(parsed) = OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        {
            return Ok(Timestamp(parsed.with_timezone(&Utc)));
        }

        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Ok(Timestamp(naive.and_utc()));
        }

        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Timestamp(naive.and_utc()))
            .ok_or_else(|| format!("invalid timestamp '{raw}'"))
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = Timestamp::parse("2024-01-15T10:30:00-03:00").unwrap();
        assert_eq!(ts.to_string(), "2024-01-15T13:30:00Z");
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let a = Timestamp::parse("2024-01-15T10:30:00").unwrap();
        let b = Timestamp::parse("2024-01-15 10:30:00.250").unwrap();
        assert_eq!(a.epoch_millis(), 1_705_314_600_000);
        assert_eq!(b.epoch_millis(), 1_705_314_600_250);
    }

    #[test]
    fn test_parse_date_only_as_midnight_utc() {
        let ts = Timestamp::parse("2024-01-15").unwrap();
        assert_eq!(ts.epoch_millis(), 1_705_276_800_000);
        assert_eq!(ts.to_string(), "2024-01-15T00:00:00Z");
    }

    #[test]
    fn test_parse_minute_precision() {
        let a = Timestamp::parse("2024-01-15T10:30").unwrap();
        let b = Timestamp::parse("2024-01-15 10:30").unwrap();
        assert_eq!(a.epoch_millis(), 1_705_314_600_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_compact_offset() {
        let utc = Timestamp::parse("2024-01-15T10:30:00+0000").unwrap();
        assert_eq!(utc.epoch_millis(), 1_705_314_600_000);

        let shifted = Timestamp::parse("2024-01-15T10:30:00-0300").unwrap();
        assert_eq!(shifted.to_string(), "2024-01-15T13:30:00Z");

        let minutes = Timestamp::parse("2024-01-15T10:30+0100").unwrap();
        assert_eq!(minutes.to_string(), "2024-01-15T09:30:00Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Timestamp::parse("yesterday").unwrap_err();
        assert!(err.contains("yesterday"));
    }
}
