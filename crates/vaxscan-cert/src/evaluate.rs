//! # Validity Evaluation
//!
//! Classifies a scanned payload against a point in time: `VALID`,
//! `EXPIRED`, or `MALFORMED`.
//!
//! ## Partial results
//!
//! The issue and expiry instants are fixed before the credential blob is
//! decoded. A result that goes `MALFORMED` at the credential step
//! therefore still carries both instants, and display code renders them
//! under the failure banner. This field-availability contract is relied
//! on downstream; it is deliberate, not an accident of ordering.
//!
//! ## Purity
//!
//! `evaluate` is a pure function of the envelope, the clock, and the
//! immutable zone configuration. Identical inputs produce identical
//! results, so one scan can never contaminate the next.

use serde::{Deserialize, Serialize};

use vaxscan_core::error::{EnvelopeError, VaxscanError};
use vaxscan_core::{DisplayZone, Timestamp};

use crate::credential::Credential;
use crate::envelope::ScanEnvelope;
use crate::period::ExpiryPeriod;

/// Banner prefix for structurally unusable payloads.
const MALFORMED_BANNER: &str = "INVALID CERTIFICATE";

/// Terminal classification of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationState {
    /// The payload could not be decoded into a certificate.
    Malformed,
    /// The certificate decoded but its expiry instant has passed.
    Expired,
    /// The certificate decoded and is within its validity window.
    Valid,
}

impl ValidationState {
    /// Whether the certificate may be accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl std::fmt::Display for ValidationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Malformed => "MALFORMED",
            Self::Expired => "EXPIRED",
            Self::Valid => "VALID",
        };
        f.write_str(s)
    }
}

/// The outcome of evaluating one scanned payload.
///
/// Transient: constructed fresh per scan, owned by the caller, never
/// shared across evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Terminal classification.
    pub state: ValidationState,
    /// Issuance instant; present once the envelope yielded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<Timestamp>,
    /// Expiry instant; present once computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    /// Decoded credential; present only when the blob decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,
    /// Human-readable explanation; present whenever `state` is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    /// Whether the certificate may be accepted.
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    fn malformed(message: String) -> Self {
        Self {
            state: ValidationState::Malformed,
            issued_at: None,
            expires_at: None,
            credential: None,
            message: Some(message),
        }
    }
}

/// Convert an envelope parse failure into the malformed result the
/// display layer expects. No instants exist at this stage.
pub(crate) fn reject_parse(err: &EnvelopeError) -> ValidationResult {
    ValidationResult::malformed(format!("{MALFORMED_BANNER}: {err}"))
}

/// Evaluates scanned payloads against a point in time.
///
/// Carries the fixed display zone as explicit immutable configuration.
/// The zone never changes between scans; substituting it is a test-time
/// concern.
#[derive(Debug, Clone)]
pub struct ValidityEvaluator {
    zone: DisplayZone,
}

impl ValidityEvaluator {
    /// An evaluator rendering instants in the given zone.
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    /// The evaluator's display zone.
    pub fn zone(&self) -> &DisplayZone {
        &self.zone
    }

    /// Full pipeline: parse the raw payload, then evaluate. Parse failures
    /// are absorbed into a malformed result rather than propagated.
    pub fn process(&self, raw: &str, now: Timestamp) -> ValidationResult {
        match ScanEnvelope::parse(raw) {
            Ok(envelope) => self.evaluate(&envelope, now),
            Err(err) => reject_parse(&err),
        }
    }

    /// Classify a parsed envelope against `now`.
    ///
    /// The pipeline runs issuance, period, expiry arithmetic, credential
    /// decode, then the expiry comparison; it stops at the first failure
    /// and surfaces whatever instants were already fixed. `now` equal to
    /// the expiry instant is still valid; only a strictly later clock
    /// expires the certificate.
    pub fn evaluate(&self, envelope: &ScanEnvelope, now: Timestamp) -> ValidationResult {
        let issued_at = match Timestamp::from_epoch_secs(envelope.issued_at_epoch) {
            Ok(ts) => ts,
            Err(err) => return ValidationResult::malformed(format!("{MALFORMED_BANNER}: {err}")),
        };

        let period = match envelope.expiry_period.parse::<ExpiryPeriod>() {
            Ok(period) => period,
            Err(err) => {
                return ValidationResult {
                    state: ValidationState::Malformed,
                    issued_at: Some(issued_at),
                    expires_at: None,
                    credential: None,
                    message: Some(format!("{MALFORMED_BANNER}: {err}")),
                }
            }
        };

        let expires_at = match issued_at.checked_add_secs(period.as_secs()) {
            Some(ts) => ts,
            None => {
                return ValidationResult {
                    state: ValidationState::Malformed,
                    issued_at: Some(issued_at),
                    expires_at: None,
                    credential: None,
                    message: Some(format!(
                        "{MALFORMED_BANNER}: {}",
                        VaxscanError::ExpiryOverflow
                    )),
                }
            }
        };

        // Both instants are fixed from here on; they survive a credential
        // decode failure.
        let credential = match Credential::from_blob(&envelope.credential_blob) {
            Ok(credential) => credential,
            Err(err) => {
                return ValidationResult {
                    state: ValidationState::Malformed,
                    issued_at: Some(issued_at),
                    expires_at: Some(expires_at),
                    credential: None,
                    message: Some(format!("{MALFORMED_BANNER}: {err}")),
                }
            }
        };

        if now > expires_at {
            return ValidationResult {
                state: ValidationState::Expired,
                issued_at: Some(issued_at),
                expires_at: Some(expires_at),
                credential: Some(credential),
                message: Some(format!(
                    "EXPIRED: Vaccination certificate expired on {}.",
                    self.zone.format(&expires_at)
                )),
            };
        }

        ValidationResult {
            state: ValidationState::Valid,
            issued_at: Some(issued_at),
            expires_at: Some(expires_at),
            credential: Some(credential),
            message: None,
        }
    }
}

impl Default for ValidityEvaluator {
    fn default() -> Self {
        Self::new(DisplayZone::johannesburg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde_json::json;

    fn credential_blob() -> String {
        BASE64.encode(
            serde_json::to_vec(&json!({
                "idType": "RSA_ID",
                "idValue": "9001015009087",
                "firstName": "Thandi",
                "surname": "Mokoena",
                "dateOfBirth": "1990-01-01",
                "immunizationEvents": []
            }))
            .unwrap(),
        )
    }

    fn envelope(iat: i64, exp: &str, hcert: &str) -> ScanEnvelope {
        ScanEnvelope {
            issued_at_epoch: iat,
            expiry_period: exp.to_string(),
            credential_blob: hcert.to_string(),
        }
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_epoch_secs(secs).unwrap()
    }

    // ── Classification ───────────────────────────────────────────────

    #[test]
    fn test_valid_within_window() {
        let evaluator = ValidityEvaluator::default();
        let result = evaluator.evaluate(&envelope(1000, "P3600", &credential_blob()), at(2000));

        assert_eq!(result.state, ValidationState::Valid);
        assert!(result.is_valid());
        assert_eq!(result.issued_at, Some(at(1000)));
        assert_eq!(result.expires_at, Some(at(4600)));
        assert!(result.message.is_none());
        let credential = result.credential.unwrap();
        assert_eq!(credential.first_name, "Thandi");
        assert!(credential.immunization_events.is_empty());
    }

    #[test]
    fn test_valid_exactly_at_expiry() {
        // The boundary is inclusive: now == expiry is still valid.
        let evaluator = ValidityEvaluator::default();
        let result = evaluator.evaluate(&envelope(1000, "P3600", &credential_blob()), at(4600));
        assert_eq!(result.state, ValidationState::Valid);
    }

    #[test]
    fn test_expired_one_second_past_expiry() {
        let evaluator = ValidityEvaluator::default();
        let result = evaluator.evaluate(&envelope(1000, "P3600", &credential_blob()), at(4601));

        assert_eq!(result.state, ValidationState::Expired);
        let message = result.message.unwrap();
        assert!(message.starts_with("EXPIRED: Vaccination certificate expired on "));
        // 4600s after the epoch, rendered in SAST.
        assert!(message.contains("1970-01-01 03:16:40 +02:00"));
        // The decoded credential stays available under the expired banner.
        assert!(result.credential.is_some());
    }

    #[test]
    fn test_expired_message_follows_zone_config() {
        let evaluator = ValidityEvaluator::new(DisplayZone::utc());
        let result = evaluator.evaluate(&envelope(1000, "P3600", &credential_blob()), at(4601));
        assert!(result.message.unwrap().contains("1970-01-01 01:16:40 +00:00"));
    }

    // ── Malformed stages ─────────────────────────────────────────────

    #[test]
    fn test_malformed_period_keeps_issue_instant() {
        let evaluator = ValidityEvaluator::default();
        let result = evaluator.evaluate(&envelope(1000, "3600", &credential_blob()), at(2000));

        assert_eq!(result.state, ValidationState::Malformed);
        assert_eq!(result.issued_at, Some(at(1000)));
        assert!(result.expires_at.is_none());
        assert!(result.credential.is_none());
        assert!(result.message.unwrap().starts_with("INVALID CERTIFICATE: "));
    }

    #[test]
    fn test_malformed_credential_keeps_both_instants() {
        let evaluator = ValidityEvaluator::default();
        let result = evaluator.evaluate(&envelope(1000, "P3600", "not-base64!!"), at(2000));

        assert_eq!(result.state, ValidationState::Malformed);
        assert_eq!(result.issued_at, Some(at(1000)));
        assert_eq!(result.expires_at, Some(at(4600)));
        assert!(result.credential.is_none());
        assert!(result.message.is_some());
    }

    #[test]
    fn test_malformed_iat_out_of_range() {
        let evaluator = ValidityEvaluator::default();
        let result = evaluator.evaluate(&envelope(i64::MAX, "P1", &credential_blob()), at(0));
        assert_eq!(result.state, ValidationState::Malformed);
        assert!(result.issued_at.is_none());
    }

    #[test]
    fn test_malformed_expiry_overflow() {
        let evaluator = ValidityEvaluator::default();
        let huge = format!("P{}", u64::MAX);
        let result = evaluator.evaluate(&envelope(1000, &huge, &credential_blob()), at(0));
        assert_eq!(result.state, ValidationState::Malformed);
        assert_eq!(result.issued_at, Some(at(1000)));
        assert!(result.expires_at.is_none());
    }

    // ── Pipeline entry ───────────────────────────────────────────────

    #[test]
    fn test_process_absorbs_parse_failure() {
        let evaluator = ValidityEvaluator::default();
        let result = evaluator.process("not json", at(0));

        assert_eq!(result.state, ValidationState::Malformed);
        assert!(result.issued_at.is_none());
        assert!(result.expires_at.is_none());
        assert!(result.message.unwrap().starts_with("INVALID CERTIFICATE: "));
    }

    #[test]
    fn test_process_well_formed_payload() {
        let raw = format!(
            r#"{{"iat":1000,"exp":"P3600","hcert":"{}"}}"#,
            credential_blob()
        );
        let evaluator = ValidityEvaluator::default();
        assert!(evaluator.process(&raw, at(2000)).is_valid());
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let evaluator = ValidityEvaluator::default();
        let env = envelope(1000, "P3600", &credential_blob());
        let first = evaluator.evaluate(&env, at(4601));
        let second = evaluator.evaluate(&env, at(4601));
        assert_eq!(first, second);
    }

    // ── Display ──────────────────────────────────────────────────────

    #[test]
    fn test_state_display() {
        assert_eq!(ValidationState::Malformed.to_string(), "MALFORMED");
        assert_eq!(ValidationState::Expired.to_string(), "EXPIRED");
        assert_eq!(ValidationState::Valid.to_string(), "VALID");
    }
}
