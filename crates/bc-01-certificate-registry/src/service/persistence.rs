//! Loading and encoding of the persisted tables.

use super::CertificateRegistryService;
use crate::domain::access::AccessController;
use crate::domain::certificates::CertificateStore;
use crate::domain::entities::{CertificateRecord, IssuerEntry};
use crate::domain::errors::{KVStoreError, RegistryResult};
use crate::domain::keys::KeyPrefix;
use crate::domain::state::RegistryState;
use crate::domain::transition::StateChange;
use crate::ports::outbound::{BatchOperation, KeyValueStore, StateSerializer, TimeSource};
use shared_bus::EventPublisher;
use shared_types::Principal;
use std::collections::HashMap;

impl<KV, TS, SZ, EP> CertificateRegistryService<KV, TS, SZ, EP>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SZ: StateSerializer,
    EP: EventPublisher,
{
    /// Rebuild the tables from the store. `None` means the store holds no
    /// registry yet.
    pub(crate) fn load_state(&self) -> RegistryResult<Option<RegistryState>> {
        let issuer_rows = self.kv_store.prefix_scan(KeyPrefix::Issuer.as_bytes())?;
        let certificate_rows = self.kv_store.prefix_scan(KeyPrefix::Certificate.as_bytes())?;

        let Some(owner_bytes) = self.kv_store.get(&KeyPrefix::owner_key())? else {
            if issuer_rows.is_empty() && certificate_rows.is_empty() {
                return Ok(None);
            }
            return Err(KVStoreError::CorruptionError {
                message: "registry rows present without an owner cell".to_string(),
            }
            .into());
        };

        // `None` here is a renounced owner, not a missing cell.
        let owner: Option<Principal> = self.serializer.deserialize(&owner_bytes)?;

        let mut issuers = HashMap::with_capacity(issuer_rows.len());
        let prefix_len = KeyPrefix::Issuer.as_bytes().len();
        for (key, value) in issuer_rows {
            let principal = Principal::from_slice(&key[prefix_len..]).ok_or_else(|| {
                KVStoreError::CorruptionError {
                    message: format!("malformed issuer key of {} bytes", key.len()),
                }
            })?;
            let entry: IssuerEntry = self.serializer.deserialize(&value)?;
            issuers.insert(principal, entry);
        }

        let records = certificate_rows
            .into_iter()
            .map(|(_, value)| self.serializer.deserialize::<CertificateRecord>(&value))
            .collect::<RegistryResult<Vec<_>>>()?;

        Ok(Some(RegistryState {
            access: AccessController::from_parts(owner, issuers),
            certificates: CertificateStore::from_records(records),
        }))
    }

    /// The single row write for a validated change.
    pub(crate) fn encode_change(&self, change: &StateChange) -> RegistryResult<BatchOperation> {
        let operation = match change {
            StateChange::Owner(owner) => {
                BatchOperation::put(KeyPrefix::owner_key(), self.serializer.serialize(owner)?)
            }
            StateChange::Issuer { principal, entry } => BatchOperation::put(
                KeyPrefix::issuer_key(principal),
                self.serializer.serialize(entry)?,
            ),
            StateChange::Certificate(record) => BatchOperation::put(
                KeyPrefix::certificate_key(&record.hash),
                self.serializer.serialize(record)?,
            ),
        };
        Ok(operation)
    }
}
