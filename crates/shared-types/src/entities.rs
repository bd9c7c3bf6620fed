//! # Core Domain Entities
//!
//! Primitives shared across the workspace.
//!
//! - **Identity**: `Principal` (20-byte account address)
//! - **Time**: `Timestamp` (seconds since the Unix epoch)

use crate::errors::PrincipalParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Caller-supplied certificate content digest. Opaque to the registry.
pub type CertificateHash = String;

/// Byte width of a principal.
pub const PRINCIPAL_LEN: usize = 20;

// =============================================================================
// PRINCIPAL (20 bytes)
// =============================================================================

/// An opaque caller identity, equivalent to an account address.
///
/// The all-zero value is the null principal and is never a valid owner or
/// issuer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Principal(pub [u8; PRINCIPAL_LEN]);

impl Principal {
    /// The null principal (0x0000...0000).
    pub const ZERO: Self = Self([0u8; PRINCIPAL_LEN]);

    /// Creates a principal from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; PRINCIPAL_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates a principal from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != PRINCIPAL_LEN {
            return None;
        }
        let mut bytes = [0u8; PRINCIPAL_LEN];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PRINCIPAL_LEN] {
        &self.0
    }

    /// Returns true if this is the null principal.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PRINCIPAL_LEN]
    }

    /// Abbreviated form for log lines: `0x1234abcd...ef01`.
    #[must_use]
    pub fn short(&self) -> String {
        format!(
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[PRINCIPAL_LEN - 2..])
        )
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.short())
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Principal {
    type Err = PrincipalParseError;

    /// Parses `0x`-prefixed or bare hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| PrincipalParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(PrincipalParseError::InvalidLength {
            expected: PRINCIPAL_LEN,
            actual: bytes.len(),
        })
    }
}

impl From<[u8; PRINCIPAL_LEN]> for Principal {
    fn from(bytes: [u8; PRINCIPAL_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Principal> for [u8; PRINCIPAL_LEN] {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}
