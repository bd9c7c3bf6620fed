//! # Ports
//!
//! - `inbound` - the registry API offered to callers (driving port)
//! - `outbound` - storage, time and encoding the host supplies (driven ports)

pub mod inbound;
pub mod outbound;

pub use inbound::CertificateRegistryApi;
pub use outbound::{BatchOperation, KeyValueStore, ScanResult, StateSerializer, TimeSource};
