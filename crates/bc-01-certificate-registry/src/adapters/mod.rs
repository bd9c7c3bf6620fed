//! # Adapters Module
//!
//! Implementations of the outbound ports plus the verification API payloads.
//!
//! ## Modules
//!
//! - `storage`: `KeyValueStore` backends (memory, file, RocksDB)
//! - `infra`: time sources
//! - `serializer`: bincode row encoding
//! - `api_handler`: JSON verification endpoint payloads

#[cfg(feature = "api")]
pub mod api_handler;
pub mod infra;
pub mod serializer;
pub mod storage;

#[cfg(feature = "api")]
pub use api_handler::{handle_verify_request, VerificationResponse, VerifyRequest};
pub use infra::{ManualTimeSource, SystemTimeSource};
pub use serializer::BincodeStateSerializer;
pub use storage::{FileBackedKVStore, InMemoryKVStore};
#[cfg(feature = "rocksdb")]
pub use storage::{RocksDbConfig, RocksDbStore};
