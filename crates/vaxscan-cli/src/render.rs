//! # Result Rendering
//!
//! Plain-text view of a validation result: a banner line, then the
//! certificate details with issuance and expiry rendered in the display
//! zone.
//!
//! Instants are printed whenever the result carries them, including under
//! a failure banner. A payload whose credential blob would not decode
//! still shows when it was issued and when it would have expired.

use vaxscan_cert::ValidationResult;
use vaxscan_core::DisplayZone;

/// Render the result screen as plain text.
pub fn render_result(result: &ValidationResult, zone: &DisplayZone) -> String {
    let mut out = String::new();

    match &result.message {
        None => out.push_str("CERTIFICATE VALID\n"),
        Some(message) => {
            out.push_str(message);
            out.push('\n');
        }
    }

    if let Some(credential) = &result.credential {
        out.push_str("\nCertificate Details\n");
        out.push_str(&format!("  ID Document Used:  {}\n", credential.id_type));
        out.push_str(&format!("  ID Number:  {}\n", credential.id_value));
        out.push_str(&format!("  Firstname:  {}\n", credential.first_name));
        out.push_str(&format!("  Surname:  {}\n", credential.surname));
        out.push_str(&format!("  Date of Birth:  {}\n", credential.date_of_birth));
        for event in &credential.immunization_events {
            out.push('\n');
            out.push_str(&format!("  Vaccine Received:  {}\n", event.vaccine_received));
            out.push_str(&format!("  Vaccine Date:  {}\n", event.vaccine_date));
            out.push_str(&format!(
                "  Proof of Vaccination Code:  {}\n",
                event.proof_of_vaccine_code
            ));
        }
    }

    if let Some(issued_at) = &result.issued_at {
        out.push_str(&format!("\n  Date Issued:  {}\n", zone.format(issued_at)));
    }
    if let Some(expires_at) = &result.expires_at {
        out.push_str(&format!("  Expiry Date:  {}\n", zone.format(expires_at)));
    }

    out
}
