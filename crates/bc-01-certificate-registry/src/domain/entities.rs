//! # Domain Entities
//!
//! Records held by the registry tables.

use serde::{Deserialize, Serialize};
use shared_types::{CertificateHash, Timestamp};

/// Whitelist entry for an issuing authority.
///
/// Entries are never deleted; removal only clears `active`, so certificates
/// stay attributable after the issuer is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerEntry {
    pub name: String,
    pub active: bool,
}

impl IssuerEntry {
    /// A freshly registered, active entry.
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
        }
    }
}

/// An immutable certificate record, keyed by its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Person the certificate was issued to.
    pub subject_name: String,
    /// Course or subject certified.
    pub course_or_subject: String,
    /// Caller-computed content digest; the record's key.
    pub hash: CertificateHash,
    /// Engine time at creation.
    pub issued_at: Timestamp,
    /// Issuer's registered name at creation time.
    pub issuer_name: String,
    /// Always `true`; no operation revokes a record.
    pub valid: bool,
}

/// Result of a certificate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub found: bool,
    pub record: Option<CertificateRecord>,
}

impl Verification {
    /// No record exists for the queried hash.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            found: false,
            record: None,
        }
    }

    /// A record exists.
    #[must_use]
    pub fn present(record: CertificateRecord) -> Self {
        Self {
            found: true,
            record: Some(record),
        }
    }
}

