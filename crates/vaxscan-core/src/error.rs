//! # Error Types
//!
//! Structured errors for the scan pipeline, all derived with `thiserror`.
//! Each decoding stage has its own enum naming the violating field or
//! value; [`VaxscanError`] aggregates them at the top level.
//!
//! These types never reach the user directly. The evaluation boundary
//! converts every failure into a validation result with a message; the
//! error values exist so that stages compose with `?` and tests can match
//! on the exact failure.

use thiserror::Error;

/// Top-level error type for VaxScan.
#[derive(Error, Debug)]
pub enum VaxscanError {
    /// Envelope parsing failed.
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Expiry period grammar violation.
    #[error("expiry period error: {0}")]
    Period(#[from] PeriodError),

    /// Credential blob decoding failed.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Scan lifecycle violation.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// An epoch value does not map to a representable instant.
    #[error("timestamp out of range: {0} seconds since epoch")]
    TimestampOutOfRange(i64),

    /// Expiry arithmetic left the representable time range.
    #[error("expiry instant overflows the representable time range")]
    ExpiryOverflow,
}

/// Errors from structural decoding of the scanned payload.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// The raw text is not parseable as JSON at all.
    #[error("payload is not valid JSON: {0}")]
    Syntax(String),

    /// The payload parsed as JSON but is not an object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// A required envelope field is absent.
    #[error("missing required field {field:?}")]
    MissingField {
        /// The wire name of the absent field.
        field: &'static str,
    },

    /// A required envelope field is present with the wrong primitive type.
    #[error("field {field:?} must be {expected}")]
    WrongType {
        /// The wire name of the mistyped field.
        field: &'static str,
        /// What the field must be.
        expected: &'static str,
    },
}

/// Errors from the `P{n}` expiry-period grammar.
#[derive(Error, Debug)]
pub enum PeriodError {
    /// The period string does not start with the `P` marker.
    #[error("expiry period {0:?} does not start with 'P'")]
    MissingMarker(String),

    /// The characters after the marker are not a plain run of digits.
    #[error("expiry period {0:?} must be 'P' followed by whole seconds in digits")]
    InvalidSeconds(String),

    /// The seconds value does not fit in 64 bits.
    #[error("expiry period {0:?} is out of range")]
    OutOfRange(String),
}

/// Errors from decoding the embedded credential blob.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The blob is not decodable as standard base64.
    #[error("credential blob is not valid base64: {0}")]
    Base64(String),

    /// The decoded bytes are not JSON in the credential shape.
    #[error("credential blob does not decode to a credential record: {0}")]
    Shape(String),
}

/// Errors from the per-scan lifecycle state machine.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A scan arrived while a previous result was still held.
    #[error("scan rejected: session is {state}, reset to IDLE before scanning again")]
    SessionBusy {
        /// The state the session was in when the scan arrived.
        state: String,
    },
}
