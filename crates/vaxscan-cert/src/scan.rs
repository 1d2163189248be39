//! # Scan Lifecycle State Machine
//!
//! Each scan runs one synchronous pass through the pipeline:
//!
//! ```text
//! Idle ──▶ Parsing ──▶ Decoding ──▶ {Malformed, Expired, Valid}
//!             │
//!             └──▶ Malformed
//! ```
//!
//! Terminal states hold the result until the session is explicitly reset,
//! which is the frontend's back-button / "scan another" action. A scan
//! arriving before the reset is rejected with a structured error, never
//! silently re-evaluated. There are no retries; each scan is independent.

use vaxscan_core::error::ScanError;
use vaxscan_core::Timestamp;

use crate::envelope::ScanEnvelope;
use crate::evaluate::{reject_parse, ValidationResult, ValidationState, ValidityEvaluator};

/// Where a scan session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanState {
    /// Ready to accept a scan.
    Idle,
    /// Structural decoding of the raw payload.
    Parsing,
    /// Envelope accepted; evaluating period, instants, and credential.
    Decoding,
    /// The payload could not be decoded. Terminal.
    Malformed,
    /// The certificate's expiry instant has passed. Terminal.
    Expired,
    /// The certificate is currently valid. Terminal.
    Valid,
}

impl ScanState {
    /// Whether this state holds a finished result.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Malformed | Self::Expired | Self::Valid)
    }
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::Parsing => "PARSING",
            Self::Decoding => "DECODING",
            Self::Malformed => "MALFORMED",
            Self::Expired => "EXPIRED",
            Self::Valid => "VALID",
        };
        f.write_str(s)
    }
}

/// A single-scan session: accepts one payload, holds the terminal result
/// until reset.
#[derive(Debug, Clone)]
pub struct ScanSession {
    evaluator: ValidityEvaluator,
    state: ScanState,
    result: Option<ValidationResult>,
}

impl ScanSession {
    /// A fresh session in the idle state.
    pub fn new(evaluator: ValidityEvaluator) -> Self {
        Self {
            evaluator,
            state: ScanState::Idle,
            result: None,
        }
    }

    /// The session's current lifecycle state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// The held result, if a scan has finished since the last reset.
    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    /// Run one scan through the pipeline.
    ///
    /// Only an idle session accepts a scan; anything else means the
    /// frontend has not yet dismissed the previous result.
    pub fn handle_scan(
        &mut self,
        raw: &str,
        now: Timestamp,
    ) -> Result<&ValidationResult, ScanError> {
        if self.state != ScanState::Idle {
            return Err(ScanError::SessionBusy {
                state: self.state.to_string(),
            });
        }

        self.state = ScanState::Parsing;
        let result = match ScanEnvelope::parse(raw) {
            Ok(envelope) => {
                self.state = ScanState::Decoding;
                self.evaluator.evaluate(&envelope, now)
            }
            Err(err) => reject_parse(&err),
        };

        self.state = match result.state {
            ValidationState::Malformed => ScanState::Malformed,
            ValidationState::Expired => ScanState::Expired,
            ValidationState::Valid => ScanState::Valid,
        };
        Ok(self.result.insert(result))
    }

    /// Discard the current result and return to idle, ready for the next
    /// scan.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
        self.result = None;
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new(ValidityEvaluator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde_json::json;

    fn valid_payload() -> String {
        let blob = BASE64.encode(
            serde_json::to_vec(&json!({
                "idType": "RSA_ID",
                "idValue": "1",
                "firstName": "A",
                "surname": "B",
                "dateOfBirth": "2000-01-01"
            }))
            .unwrap(),
        );
        format!(r#"{{"iat":1000,"exp":"P3600","hcert":"{blob}"}}"#)
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_epoch_secs(secs).unwrap()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = ScanSession::default();
        assert_eq!(session.state(), ScanState::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_scan_to_valid() {
        let mut session = ScanSession::default();
        let result = session.handle_scan(&valid_payload(), at(2000)).unwrap();
        assert!(result.is_valid());
        assert_eq!(session.state(), ScanState::Valid);
        assert!(session.state().is_terminal());
    }

    #[test]
    fn test_scan_to_expired() {
        let mut session = ScanSession::default();
        session.handle_scan(&valid_payload(), at(10_000)).unwrap();
        assert_eq!(session.state(), ScanState::Expired);
    }

    #[test]
    fn test_scan_to_malformed() {
        let mut session = ScanSession::default();
        session.handle_scan("not json", at(0)).unwrap();
        assert_eq!(session.state(), ScanState::Malformed);
        assert!(session.result().unwrap().message.is_some());
    }

    #[test]
    fn test_second_scan_rejected_until_reset() {
        let mut session = ScanSession::default();
        session.handle_scan(&valid_payload(), at(2000)).unwrap();

        let err = session.handle_scan(&valid_payload(), at(2000)).unwrap_err();
        assert!(matches!(err, ScanError::SessionBusy { .. }));
        // The held result is untouched by the rejected scan.
        assert_eq!(session.state(), ScanState::Valid);
        assert!(session.result().is_some());
    }

    #[test]
    fn test_reset_allows_next_scan() {
        let mut session = ScanSession::default();
        session.handle_scan("not json", at(0)).unwrap();
        session.reset();

        assert_eq!(session.state(), ScanState::Idle);
        assert!(session.result().is_none());
        let result = session.handle_scan(&valid_payload(), at(2000)).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_each_scan_is_independent() {
        // A malformed scan leaves nothing behind that affects the next one.
        let mut session = ScanSession::default();
        session.handle_scan("garbage", at(0)).unwrap();
        session.reset();
        session.handle_scan(&valid_payload(), at(2000)).unwrap();
        let second = session.result().unwrap().clone();

        let mut fresh = ScanSession::default();
        fresh.handle_scan(&valid_payload(), at(2000)).unwrap();
        assert_eq!(&second, fresh.result().unwrap());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ScanState::Idle.is_terminal());
        assert!(!ScanState::Parsing.is_terminal());
        assert!(!ScanState::Decoding.is_terminal());
        assert!(ScanState::Malformed.is_terminal());
        assert!(ScanState::Expired.is_terminal());
        assert!(ScanState::Valid.is_terminal());
    }

    #[test]
    fn test_scan_state_display() {
        assert_eq!(ScanState::Idle.to_string(), "IDLE");
        assert_eq!(ScanState::Parsing.to_string(), "PARSING");
        assert_eq!(ScanState::Decoding.to_string(), "DECODING");
        assert_eq!(ScanState::Malformed.to_string(), "MALFORMED");
        assert_eq!(ScanState::Expired.to_string(), "EXPIRED");
        assert_eq!(ScanState::Valid.to_string(), "VALID");
    }
}
