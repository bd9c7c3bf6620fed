//! # Domain Errors
//!
//! Error types for the Certificate Registry.
//!
//! Every variant is deterministic for a given state and input. A failed
//! operation leaves the registry exactly as it was before the call.

use shared_types::{CertificateHash, Principal};
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller lacks the required role (not the owner, or not an active issuer).
    #[error("Unauthorized account: {caller}")]
    Unauthorized { caller: Principal },

    /// Malformed input (empty hash, null principal).
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A certificate for this hash already exists.
    #[error("Certificate already exists: {hash}")]
    AlreadyExists { hash: CertificateHash },

    /// Referenced issuer was never registered.
    ///
    /// Part of the error taxonomy for hosts that map strict semantics; the
    /// engine itself treats deactivating an unknown issuer as a no-op.
    #[error("Issuer not found: {principal}")]
    NotFound { principal: Principal },

    /// Persistent store failure. The operation was rolled back.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Stored bytes could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Coarse error category, stable across variants' payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    InvalidArgument,
    AlreadyExists,
    NotFound,
    Storage,
}

impl RegistryError {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage { .. } | Self::Serialization { .. } => ErrorKind::Storage,
        }
    }
}

/// Errors from key-value store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// Another process holds the store.
    #[error("KV store locked: {path}")]
    Locked { path: String },
}

impl From<KVStoreError> for RegistryError {
    fn from(err: KVStoreError) -> Self {
        RegistryError::Storage {
            message: err.to_string(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
