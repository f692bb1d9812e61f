//! # Temporal Types: Kickoff Times
//!
//! Defines `Kickoff`, the UTC timestamp of a match kickoff, truncated to
//! seconds precision.
//!
//! Inputs may carry any RFC 3339 offset (`Z`, `+00:00`, `+01:00`, ...);
//! they are converted to UTC at construction. Output is always rendered
//! with an explicit `+00:00` offset, e.g. `2024-08-17T15:00:00+00:00`,
//! which is the form match feeds publish and Python's
//! `datetime.isoformat()` produces.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// A match kickoff time in UTC, truncated to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kickoff(DateTime<Utc>);

impl Kickoff {
    /// Create a kickoff from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Kickoff on `date` at `hour:00` UTC.
    pub fn on_date(date: NaiveDate, hour: u32) -> Result<Self, ModelError> {
        let naive = date.and_hms_opt(hour, 0, 0).ok_or_else(|| ModelError::InvalidField {
            field: "kickoff",
            reason: format!("hour {hour} is out of range"),
        })?;
        Ok(Self(Utc.from_utc_datetime(&naive)))
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 (a bare date such as `2024-08-17` is rejected).
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| ModelError::InvalidTimestamp {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The calendar date of the kickoff (UTC).
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Render as RFC 3339 with a `+00:00` offset.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

impl std::fmt::Display for Kickoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl std::str::FromStr for Kickoff {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Kickoff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Kickoff {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
