//! Shared fixtures for the registry's unit tests.

use crate::adapters::{BincodeStateSerializer, InMemoryKVStore, ManualTimeSource};
use crate::domain::errors::KVStoreError;
use crate::ports::inbound::CertificateRegistryApi;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use crate::service::{CertificateRegistryService, RegistryDependencies};
use shared_bus::InMemoryEventBus;
use shared_types::Principal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const OWNER: Principal = Principal::new([0x01; 20]);
pub const ISSUER: Principal = Principal::new([0x02; 20]);
pub const NEW_OWNER: Principal = Principal::new([0x03; 20]);
pub const STRANGER: Principal = Principal::new([0x04; 20]);

pub const GENESIS_TIME: u64 = 1_700_000_000;

pub type TestRegistry = CertificateRegistryService<
    InMemoryKVStore,
    ManualTimeSource,
    BincodeStateSerializer,
    Arc<InMemoryEventBus>,
>;

pub fn make_registry_with_bus(bus: Arc<InMemoryEventBus>) -> (TestRegistry, ManualTimeSource) {
    let clock = ManualTimeSource::new(GENESIS_TIME);
    let deps = RegistryDependencies {
        kv_store: InMemoryKVStore::new(),
        time_source: clock.clone(),
        serializer: BincodeStateSerializer,
        publisher: bus,
    };
    let registry = CertificateRegistryService::new(deps, Some(OWNER)).unwrap();
    (registry, clock)
}

pub fn make_registry() -> (TestRegistry, ManualTimeSource) {
    make_registry_with_bus(Arc::new(InMemoryEventBus::new()))
}

/// Registry with `ISSUER` registered as "Harvard".
pub fn registry_with_issuer() -> (TestRegistry, ManualTimeSource) {
    let (mut registry, clock) = make_registry();
    registry
        .register_issuer(OWNER, ISSUER, "Harvard".to_string())
        .unwrap();
    (registry, clock)
}

/// Store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyKVStore {
    inner: InMemoryKVStore,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that flips write failures on and off after the store is moved.
    pub fn switch(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.fail_writes)
    }

    fn check(&self) -> Result<(), KVStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KVStoreError::IOError {
                message: "disk unplugged".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for FlakyKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.check()?;
        self.inner.put(key, value)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.check()?;
        self.inner.atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner.exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        self.inner.prefix_scan(prefix)
    }
}
