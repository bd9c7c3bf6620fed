//! # Key Layout
//!
//! Byte keys for the three logical tables inside a flat key-value store.

use shared_types::Principal;

/// Key prefixes for stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Owner cell: `o:owner` -> Option<Principal>
    Owner,
    /// Issuer rows: `i:{principal}` -> IssuerEntry
    Issuer,
    /// Certificate rows: `c:{hash}` -> CertificateRecord
    Certificate,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Owner => b"o:",
            KeyPrefix::Issuer => b"i:",
            KeyPrefix::Certificate => b"c:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    /// The single owner cell.
    pub fn owner_key() -> Vec<u8> {
        KeyPrefix::Owner.key(b"owner")
    }

    pub fn issuer_key(principal: &Principal) -> Vec<u8> {
        KeyPrefix::Issuer.key(principal.as_bytes())
    }

    /// Hash strings are stored by their UTF-8 bytes; equality stays byte-exact.
    pub fn certificate_key(hash: &str) -> Vec<u8> {
        KeyPrefix::Certificate.key(hash.as_bytes())
    }
}
