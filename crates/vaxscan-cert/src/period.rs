//! # Expiry Period
//!
//! The certificate's validity duration travels as `P{n}`: the literal `P`
//! marker followed by whole seconds in ASCII digits.
//!
//! The grammar is deliberately narrow. No other ISO-8601 unit designators,
//! no sign, no fraction, no whitespace. A looser parser would silently
//! accept certificates that deployed verifiers reject.

use std::fmt;
use std::str::FromStr;

use vaxscan_core::error::PeriodError;

/// A validity duration in whole non-negative seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryPeriod(u64);

impl ExpiryPeriod {
    /// Wrap a whole-second duration.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The duration in seconds.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Encode in the `P{n}` wire form.
    pub fn encode(&self) -> String {
        format!("P{}", self.0)
    }
}

impl FromStr for ExpiryPeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('P')
            .ok_or_else(|| PeriodError::MissingMarker(s.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PeriodError::InvalidSeconds(s.to_string()));
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| PeriodError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for ExpiryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
