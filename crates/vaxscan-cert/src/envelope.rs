//! # Scan Envelope
//!
//! The outer record scanned from the optical code: issuance epoch (`iat`),
//! expiry period (`exp`, `P{n}` seconds), and the embedded credential blob
//! (`hcert`, standard base64 of UTF-8 JSON).
//!
//! Parsing here is structural only: field presence and primitive type.
//! Whether `hcert` decodes as base64, or `exp` as a well-formed period, is
//! the evaluator's concern and fails gracefully there.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vaxscan_core::error::EnvelopeError;

/// The outer structured record scanned from an optical code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEnvelope {
    /// Issuance time, seconds since the Unix epoch.
    #[serde(rename = "iat")]
    pub issued_at_epoch: i64,

    /// Expiry period in the `P{n}` whole-seconds encoding.
    #[serde(rename = "exp")]
    pub expiry_period: String,

    /// Base64-encoded UTF-8 JSON credential.
    #[serde(rename = "hcert")]
    pub credential_blob: String,
}

impl ScanEnvelope {
    /// Parse raw scanned text into an envelope.
    ///
    /// The payload must be a JSON object carrying `iat` as an integer and
    /// `exp`/`hcert` as strings. Unknown fields are ignored. Pure; no side
    /// effects, no semantic validation of the values.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError`] naming the syntax failure or the first missing or
    /// mistyped field.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| EnvelopeError::Syntax(e.to_string()))?;
        let obj = value.as_object().ok_or(EnvelopeError::NotAnObject)?;

        let issued_at_epoch = match obj.get("iat") {
            None => return Err(EnvelopeError::MissingField { field: "iat" }),
            // as_i64 is strict: floats and numeric strings are rejected.
            Some(v) => v.as_i64().ok_or(EnvelopeError::WrongType {
                field: "iat",
                expected: "an integer number of epoch seconds",
            })?,
        };
        let expiry_period = require_string(obj, "exp")?;
        let credential_blob = require_string(obj, "hcert")?;

        Ok(Self {
            issued_at_epoch,
            expiry_period,
            credential_blob,
        })
    }
}

fn require_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, EnvelopeError> {
    match obj.get(field) {
        None => Err(EnvelopeError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(EnvelopeError::WrongType {
            field,
            expected: "a string",
        }),
    }
}
