//! Content hash of a certificate, computed by the issuing side.
//!
//! The registry treats hashes as opaque strings; this is only the
//! convention issuers use to derive them: lowercase hex SHA-256 over the
//! plain concatenation of the certificate's fields.

use sha2::{Digest, Sha256};

/// Fields covered by the digest, in hashing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateFields {
    pub student: String,
    pub course: String,
    pub university: String,
    pub period: String,
    pub score: String,
}

/// `hex(sha256(student ++ course ++ university ++ period ++ score))`
pub fn certificate_digest(fields: &CertificateFields) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fields.student.as_bytes());
    hasher.update(fields.course.as_bytes());
    hasher.update(fields.university.as_bytes());
    hasher.update(fields.period.as_bytes());
    hasher.update(fields.score.as_bytes());
    hex::encode(hasher.finalize())
}
