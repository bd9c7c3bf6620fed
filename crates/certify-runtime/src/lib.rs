//! # Certify Runtime Library
//!
//! Host process for the certificate registry. Exposes the runtime's modules
//! for testing; the entry point is the `certify` binary in `main.rs`.
//!
//! - `cli` - command-line surface (clap)
//! - `container` - configuration and registry construction
//! - `handlers` - command execution and event logging
//! - `digest` - caller-side content hash of certificate fields

pub mod cli;
pub mod container;
pub mod digest;
pub mod handlers;

pub use cli::{Cli, Command, GlobalArgs};
pub use container::{ConfigError, RegistryContainer, RuntimeConfig, StorageBackend};
pub use digest::{certificate_digest, CertificateFields};
