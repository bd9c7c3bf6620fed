//! # Registry Container
//!
//! Builds the registry service for the configured backend and owns it for
//! the lifetime of one command.

pub mod config;

pub use config::{ConfigError, RuntimeConfig, StorageBackend, StorageConfig};

use anyhow::{Context, Result};
use bc_01_certificate_registry::{
    BincodeStateSerializer, CertificateRegistryService, FileBackedKVStore, InMemoryKVStore,
    KeyValueStore, RegistryDependencies, SystemTimeSource,
};
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use tracing::info;

/// Registry wired with runtime adapters. The store is boxed so the backend
/// can be picked at startup.
pub type RegistryHost = CertificateRegistryService<
    Box<dyn KeyValueStore>,
    SystemTimeSource,
    BincodeStateSerializer,
    Arc<InMemoryEventBus>,
>;

/// Holds the opened registry. Events go to the bus handed to `open`.
pub struct RegistryContainer {
    pub registry: RegistryHost,
}

impl RegistryContainer {
    /// Open the store named by `config` and load (or initialize) the registry.
    pub fn open(config: &RuntimeConfig, bus: Arc<InMemoryEventBus>) -> Result<Self> {
        let kv_store = open_store(&config.storage)?;

        let deps = RegistryDependencies {
            kv_store,
            time_source: SystemTimeSource,
            serializer: BincodeStateSerializer,
            publisher: bus,
        };
        let registry = CertificateRegistryService::new(deps, config.genesis_owner)
            .context("failed to open certificate registry")?;

        Ok(Self { registry })
    }
}

fn open_store(storage: &StorageConfig) -> Result<Box<dyn KeyValueStore>> {
    match storage.backend {
        StorageBackend::Memory => {
            info!("[runtime] Using in-memory storage; state is discarded on exit");
            Ok(Box::new(InMemoryKVStore::new()))
        }
        StorageBackend::File => {
            let path = storage.data_dir.join("registry.db");
            let store = FileBackedKVStore::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(store))
        }
        #[cfg(feature = "rocksdb")]
        StorageBackend::RocksDb => {
            let path = storage.data_dir.join("rocksdb");
            let store = bc_01_certificate_registry::RocksDbStore::open_default(&path)
                .with_context(|| format!("failed to open RocksDB at {}", path.display()))?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::RocksDb => Err(ConfigError::BackendUnavailable { backend: "rocksdb" }.into()),
    }
}
