//! # Display Zone
//!
//! The certificate's instants are always rendered in one fixed named zone,
//! regardless of where the scan happens. Two scanners in different
//! countries must show the same expiry text for the same certificate, so
//! the zone is never read from the system locale.
//!
//! The deployment zone is Africa/Johannesburg (SAST, UTC+02:00). South
//! Africa observes no daylight saving, so a fixed offset renders it
//! exactly.

use chrono::FixedOffset;

use crate::temporal::Timestamp;

/// Offset seconds for South African Standard Time (UTC+02:00).
const SAST_OFFSET_SECS: i32 = 2 * 3600;

/// The fixed zone used to render instants for display.
///
/// An immutable configuration value, injected where instants are rendered.
/// Tests substitute other zones to pin down formatting deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayZone {
    name: String,
    offset: FixedOffset,
}

impl DisplayZone {
    /// A zone with the given name and fixed UTC offset.
    pub fn new(name: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }

    /// The deployment default: Africa/Johannesburg, UTC+02:00.
    pub fn johannesburg() -> Self {
        let offset =
            FixedOffset::east_opt(SAST_OFFSET_SECS).expect("UTC+02:00 is a valid fixed offset");
        Self::new("Africa/Johannesburg", offset)
    }

    /// Coordinated Universal Time.
    pub fn utc() -> Self {
        let offset = FixedOffset::east_opt(0).expect("UTC is a valid fixed offset");
        Self::new("UTC", offset)
    }

    /// The zone's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The zone's fixed UTC offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Render an instant in this zone (e.g., `2021-09-01 14:00:00 +02:00`).
    pub fn format(&self, ts: &Timestamp) -> String {
        ts.as_datetime()
            .with_timezone(&self.offset)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string()
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self::johannesburg()
    }
}

impl std::fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
