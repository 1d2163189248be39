//! # vaxscan-cert — Certificate Decoding & Validity Evaluation
//!
//! The core of the scanner: turns one raw scanned payload into a
//! classification.
//!
//! ```text
//! raw text ─▶ ScanEnvelope::parse ─▶ ValidityEvaluator::evaluate ─▶ ValidationResult
//! ```
//!
//! - [`envelope`] — structural decoding of the outer scanned record
//!   (`iat`, `exp`, `hcert`). Shape checks only, no policy decisions.
//! - [`period`] — the narrow `P{n}` whole-seconds grammar for `exp`.
//! - [`credential`] — the embedded personal/vaccination record and its
//!   base64 decoding.
//! - [`evaluate`] — expiry arithmetic and classification against a clock.
//! - [`scan`] — the per-scan lifecycle state machine a frontend drives.
//!
//! Every failure mode ends in a [`ValidationResult`] with a message; no
//! payload, however mangled, makes the pipeline panic or return an
//! unhandled fault.

pub mod credential;
pub mod envelope;
pub mod evaluate;
pub mod period;
pub mod scan;

// Re-export primary types.
pub use credential::{Credential, ImmunizationEvent};
pub use envelope::ScanEnvelope;
pub use evaluate::{ValidationResult, ValidationState, ValidityEvaluator};
pub use period::ExpiryPeriod;
pub use scan::{ScanSession, ScanState};
