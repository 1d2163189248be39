//! # Temporal Types
//!
//! UTC instant type for certificate validity arithmetic. Issuance instants
//! come off the wire as epoch seconds; expiry instants are derived by
//! adding a whole-second period. Everything is stored in UTC at second
//! precision. Rendering in the configured zone happens at the boundary,
//! in [`crate::zone::DisplayZone`].

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VaxscanError;

/// A UTC instant at second precision.
///
/// Ordering is chronological, so expiry classification is a plain
/// comparison against the evaluation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current wall-clock time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating
    /// sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Interpret a wire `iat` value as seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`VaxscanError::TimestampOutOfRange`] when the value does
    /// not map to a representable instant.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, VaxscanError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or(VaxscanError::TimestampOutOfRange(secs))?;
        Ok(Self(dt))
    }

    /// Seconds since the Unix epoch.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Add a whole-second period, returning `None` when the result leaves
    /// the representable time range.
    pub fn checked_add_secs(&self, secs: u64) -> Option<Self> {
        let secs = i64::try_from(secs).ok()?;
        let delta = TimeDelta::try_seconds(secs)?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2021-09-01T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
