//! # Certificate Store
//!
//! Write-once mapping from content hash to certificate record.
//!
//! Per hash the only transition is `ABSENT -> EXISTS`; `EXISTS` is terminal.
//! There is no update and no delete.

use super::access::AccessController;
use super::entities::{CertificateRecord, Verification};
use super::errors::{RegistryError, RegistryResult};
use super::transition::{StateChange, Transition};
use shared_bus::RegistryEvent;
use shared_types::{CertificateHash, Principal, Timestamp};
use std::collections::HashMap;

/// Certificate table.
#[derive(Debug, Clone, Default)]
pub struct CertificateStore {
    records: HashMap<CertificateHash, CertificateRecord>,
}

/// Caller-provided fields of a new certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCertificate {
    pub subject_name: String,
    pub course_or_subject: String,
    pub hash: CertificateHash,
}

impl CertificateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records.
    pub fn from_records(records: impl IntoIterator<Item = CertificateRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.hash.clone(), record))
                .collect(),
        }
    }

    pub fn get(&self, hash: &str) -> Option<&CertificateRecord> {
        self.records.get(hash)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.records.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lookup by hash. Pure read.
    pub fn verify(&self, hash: &str) -> Verification {
        match self.records.get(hash) {
            Some(record) => Verification::present(record.clone()),
            None => Verification::absent(),
        }
    }

    /// Validate a new certificate.
    ///
    /// Checks run in a fixed order: caller is an active issuer, hash is
    /// non-empty, hash is unused. The issuer name is snapshotted here.
    pub fn plan_create(
        &self,
        access: &AccessController,
        caller: &Principal,
        certificate: NewCertificate,
        now: Timestamp,
    ) -> RegistryResult<Transition> {
        let issuer = access.require_active_issuer(caller)?;

        if certificate.hash.is_empty() {
            return Err(RegistryError::InvalidArgument {
                reason: "certificate hash is empty",
            });
        }
        if self.contains(&certificate.hash) {
            return Err(RegistryError::AlreadyExists {
                hash: certificate.hash,
            });
        }

        let record = CertificateRecord {
            subject_name: certificate.subject_name,
            course_or_subject: certificate.course_or_subject,
            hash: certificate.hash.clone(),
            issued_at: now,
            issuer_name: issuer.name.clone(),
            valid: true,
        };

        Ok(Transition::new(
            StateChange::Certificate(record),
            RegistryEvent::CertificateIssued {
                hash: certificate.hash,
                issuer: *caller,
            },
        ))
    }

    /// Apply a validated certificate change. Existing rows are never replaced.
    pub fn apply(&mut self, change: &StateChange) {
        if let StateChange::Certificate(record) = change {
            self.records
                .entry(record.hash.clone())
                .or_insert_with(|| record.clone());
        }
    }
}
