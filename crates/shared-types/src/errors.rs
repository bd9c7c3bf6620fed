//! # Error Types
//!
//! Errors raised while decoding shared primitives.

use thiserror::Error;

/// Errors from parsing a textual principal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalParseError {
    /// Input is not valid hexadecimal.
    #[error("invalid hex in principal: {0}")]
    InvalidHex(String),

    /// Decoded byte length is not 20.
    #[error("invalid principal length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
