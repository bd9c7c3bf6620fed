//! # Certificate Registry Engine (bc-01)
//!
//! The authoritative record of which authorities may issue certificates and
//! which certificates exist. Records are keyed by a caller-supplied content
//! hash and are write-once.
//!
//! ## Architecture
//!
//! ```text
//! caller ──► CertificateRegistryApi ──► AccessController ─┐
//!                                       CertificateStore ─┤ validate
//!                                                         ▼
//!                                    KeyValueStore (atomic batch) ──► apply ──► EventPublisher
//! ```
//!
//! Every mutation is validated first, then persisted in one batch, then
//! applied to the in-memory tables, then announced. A failure at any step
//! before the batch commits leaves no trace.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Uniqueness | At most one successful create per hash, ever |
//! | 2 | Write-once | A stored record never changes |
//! | 3 | Owner gating | Whitelist and ownership changes require the current owner |
//! | 4 | Issuer gating | Creation requires an active issuer at call time |
//! | 5 | Soft deactivation | Issuer rows are never removed |
//! | 6 | Renouncement finality | No owner can ever be restored |
//! | 7 | Full rollback | A failed call changes nothing and emits nothing |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure registry logic (tables, guards, transitions)
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `service/` - Application service implementing the API
//! - `adapters/` - Storage backends, clocks, serialization, JSON payloads
//!
//! ## Usage
//!
//! ```ignore
//! use bc_01_certificate_registry::{
//!     BincodeStateSerializer, CertificateRegistryApi, CertificateRegistryService,
//!     InMemoryKVStore, RegistryDependencies, SystemTimeSource,
//! };
//!
//! let deps = RegistryDependencies {
//!     kv_store: InMemoryKVStore::new(),
//!     time_source: SystemTimeSource,
//!     serializer: BincodeStateSerializer,
//!     publisher: bus.clone(),
//! };
//! let mut registry = CertificateRegistryService::new(deps, Some(owner))?;
//! registry.register_issuer(owner, university, "Harvard".to_string())?;
//! registry.create_certificate(university, "Alice".into(), "Blockchain".into(), hash)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

// Re-export key types for convenience
pub use adapters::{
    BincodeStateSerializer, FileBackedKVStore, InMemoryKVStore, ManualTimeSource,
    SystemTimeSource,
};
#[cfg(feature = "api")]
pub use adapters::{handle_verify_request, VerificationResponse, VerifyRequest};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use domain::{
    CertificateRecord, ErrorKind, IssuerEntry, KVStoreError, KeyPrefix, RegistryError,
    RegistryResult, Verification,
};
pub use ports::inbound::CertificateRegistryApi;
pub use ports::outbound::{BatchOperation, KeyValueStore, StateSerializer, TimeSource};
pub use service::{CertificateRegistryService, RegistryDependencies};
