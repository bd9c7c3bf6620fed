//! # Verification API Handler
//!
//! JSON payloads for an HTTP front-end that verifies certificates by hash.
//! The request body is `{"certificateId": "<hash>"}`; the response mirrors
//! the stored record in camelCase with the issue date as a decimal string.

use crate::domain::entities::Verification;
use crate::ports::inbound::CertificateRegistryApi;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Body of a verification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub certificate_id: String,
}

/// Verification result as served to clients.
///
/// An unknown hash yields `isValid: false`, empty strings and `issueDate: "0"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub is_valid: bool,
    pub student_name: String,
    pub course_name: String,
    pub cert_hash: String,
    pub issue_date: String,
    pub university: String,
}

impl From<Verification> for VerificationResponse {
    fn from(verification: Verification) -> Self {
        match verification.record {
            Some(record) if verification.found => Self {
                is_valid: record.valid,
                student_name: record.subject_name,
                course_name: record.course_or_subject,
                cert_hash: record.hash,
                issue_date: record.issued_at.to_string(),
                university: record.issuer_name,
            },
            _ => Self {
                issue_date: "0".to_string(),
                ..Self::default()
            },
        }
    }
}

/// Handle a raw verification request body.
pub fn handle_verify_request<S: CertificateRegistryApi>(
    service: &S,
    body: &str,
) -> serde_json::Value {
    let request: VerifyRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("[bc-01] Rejected verification request: {}", e);
            return serde_json::json!({ "error": "Failed to verify certificate" });
        }
    };

    let response = VerificationResponse::from(service.verify_certificate(&request.certificate_id));
    serde_json::to_value(response)
        .unwrap_or_else(|_| serde_json::json!({ "error": "Failed to verify certificate" }))
}
