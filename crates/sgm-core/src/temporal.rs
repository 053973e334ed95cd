//! # Temporal Types: UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC timestamp truncated to seconds precision,
//! and the whole-day arithmetic that SLA tracking is built on.
//!
//! ## Parsing
//!
//! Case and version records arrive from several sources. Some carry a `Z`
//! suffix (`2025-12-08T09:30:00.000Z`), some an explicit offset, and older
//! version fixtures carry no zone at all (`2025-12-01T10:00:00`). The
//! lenient parser accepts all three; zone-less values are read as UTC.
//! Serialization always emits `YYYY-MM-DDTHH:MM:SSZ`.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SgmError;

const SECONDS_PER_DAY: i64 = 86_400;

/// A UTC-only timestamp, truncated to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Wrap a `DateTime<Utc>`, discarding sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a strict RFC 3339 timestamp with a `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`SgmError::Parse`] for any other offset or malformed input.
    pub fn parse(s: &str) -> Result<Self, SgmError> {
        if !s.ends_with('Z') {
            return Err(SgmError::Parse(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse an RFC 3339 timestamp with any offset, or a zone-less
    /// `YYYY-MM-DDTHH:MM:SS[.fff]` value interpreted as UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, SgmError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_utc(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self::from_utc(naive.and_utc()))
            .map_err(|e| SgmError::Parse(format!("invalid timestamp {s:?}: {e}")))
    }

    /// From Unix epoch seconds.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, SgmError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| SgmError::Parse(format!("invalid Unix timestamp: {secs}")))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix epoch seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Whole days from `earlier` to `self`, floored.
    ///
    /// Negative when `earlier` is after `self`: a record stamped a few hours
    /// in the future is `-1` days old, not `0`.
    pub fn days_since(&self, earlier: &Timestamp) -> i64 {
        (self.epoch_secs() - earlier.epoch_secs()).div_euclid(SECONDS_PER_DAY)
    }

    /// This timestamp shifted by a number of days (negative to go back).
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = SgmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_lenient(&raw).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_456_789).unwrap());
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn test_parse_z_suffix_with_millis() {
        let ts = Timestamp::parse("2025-12-08T09:30:00.000Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2025-12-08T09:30:00Z");
    }

    #[test]
    fn test_parse_strict_rejects_offset() {
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15T12:00:00").is_err());
    }

    #[test]
    fn test_parse_lenient_converts_offset() {
        let ts = Timestamp::parse_lenient("2026-01-15T17:00:00+05:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn test_parse_lenient_zoneless_is_utc() {
        let ts = Timestamp::parse_lenient("2025-12-01T10:00:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2025-12-01T10:00:00Z");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Timestamp::parse_lenient("not-a-date").is_err());
        assert!(Timestamp::parse_lenient("").is_err());
    }

    #[test]
    fn test_days_since_floors() {
        let created = Timestamp::parse("2026-01-01T12:00:00Z").unwrap();
        let now = Timestamp::parse("2026-01-11T11:59:59Z").unwrap();
        assert_eq!(now.days_since(&created), 9);
        let now = Timestamp::parse("2026-01-11T12:00:00Z").unwrap();
        assert_eq!(now.days_since(&created), 10);
    }

    #[test]
    fn test_days_since_future_is_negative() {
        let created = Timestamp::parse("2026-01-02T00:00:00Z").unwrap();
        let now = Timestamp::parse("2026-01-01T18:00:00Z").unwrap();
        assert_eq!(now.days_since(&created), -1);
    }

    #[test]
    fn test_plus_days() {
        let ts = Timestamp::parse("2026-01-31T08:00:00Z").unwrap();
        assert_eq!(ts.plus_days(1).to_iso8601(), "2026-02-01T08:00:00Z");
        assert_eq!(ts.plus_days(-31).to_iso8601(), "2025-12-31T08:00:00Z");
    }

    #[test]
    fn test_epoch_roundtrip() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        assert_eq!(Timestamp::from_epoch_secs(ts.epoch_secs()).unwrap(), ts);
    }

    #[test]
    fn test_serde_emits_z_and_accepts_zoneless() {
        let ts: Timestamp = serde_json::from_str("\"2025-12-05T14:30:00\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2025-12-05T14:30:00Z\"");
    }
}
