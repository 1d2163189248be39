//! # Credential
//!
//! The personal/vaccination record embedded (base64) inside the envelope.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use vaxscan_core::error::CredentialError;

/// One vaccination record within a credential.
///
/// Event fields are carried through exactly as issued; no validation is
/// performed on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmunizationEvent {
    /// Name of the vaccine administered.
    pub vaccine_received: String,
    /// Date of administration, as issued.
    pub vaccine_date: String,
    /// Proof-of-vaccination code printed on the certificate.
    pub proof_of_vaccine_code: String,
}

/// The decoded personal/vaccination record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// The identity-document kind used at registration.
    pub id_type: String,
    /// The identity-document number.
    pub id_value: String,
    /// Holder's first name.
    pub first_name: String,
    /// Holder's surname.
    pub surname: String,
    /// Holder's date of birth, as issued.
    pub date_of_birth: String,
    /// Vaccination events in certificate order.
    ///
    /// Absent on the wire decodes as empty, never as an error.
    #[serde(default)]
    pub immunization_events: Vec<ImmunizationEvent>,
}

impl Credential {
    /// Decode a credential from the envelope's base64 blob.
    ///
    /// Standard alphabet, no line wraps; the decoded bytes must be UTF-8
    /// JSON in the credential shape.
    ///
    /// # Errors
    ///
    /// [`CredentialError::Base64`] when the blob is not decodable,
    /// [`CredentialError::Shape`] when the bytes are not a credential
    /// record.
    pub fn from_blob(blob: &str) -> Result<Self, CredentialError> {
        let bytes = BASE64
            .decode(blob)
            .map_err(|e| CredentialError::Base64(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| CredentialError::Shape(e.to_string()))
    }
}
