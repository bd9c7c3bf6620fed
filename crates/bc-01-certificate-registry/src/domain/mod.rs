//! # Domain Layer
//!
//! Pure registry logic: no I/O, no clocks, no logging.
//!
//! - `access` - owner role and issuer whitelist
//! - `certificates` - write-once certificate table
//! - `transition` - validated mutations handed to the service
//! - `keys` - persisted key layout

pub mod access;
pub mod certificates;
pub mod entities;
pub mod errors;
pub mod keys;
pub mod state;
pub mod transition;

pub use access::AccessController;
pub use certificates::{CertificateStore, NewCertificate};
pub use entities::{CertificateRecord, IssuerEntry, Verification};
pub use errors::{ErrorKind, KVStoreError, RegistryError, RegistryResult};
pub use keys::KeyPrefix;
pub use state::RegistryState;
pub use transition::{StateChange, Transition};
