//! # Certificate Registry Service
//!
//! The main service implementing the Certificate Registry API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `CertificateRegistryApi` for every entry point
//! 2. Validates each mutation against the in-memory tables before touching them
//! 3. Persists the validated change in one atomic batch, then applies it
//! 4. Emits exactly one event per successful mutation, after the commit
//!
//! A failed call changes nothing and emits nothing.

mod persistence;

use crate::domain::certificates::NewCertificate;
use crate::domain::entities::{CertificateRecord, IssuerEntry, Verification};
use crate::domain::errors::{RegistryError, RegistryResult};
use crate::domain::state::RegistryState;
use crate::domain::transition::{StateChange, Transition};
use crate::ports::inbound::CertificateRegistryApi;
use crate::ports::outbound::{KeyValueStore, StateSerializer, TimeSource};
use shared_bus::{EventPublisher, RegistryEvent};
use shared_types::Principal;
use tracing::{debug, info, warn};

/// The Certificate Registry Service.
pub struct CertificateRegistryService<KV, TS, SZ, EP>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SZ: StateSerializer,
    EP: EventPublisher,
{
    /// Key-value store for persistence.
    pub(crate) kv_store: KV,
    /// Clock for `issued_at`.
    pub(crate) time_source: TS,
    /// Row encoding.
    pub(crate) serializer: SZ,
    /// Event sink, fed after every commit.
    pub(crate) publisher: EP,
    /// In-memory mirror of the persisted tables.
    pub(crate) state: RegistryState,
}

/// Dependencies for CertificateRegistryService
pub struct RegistryDependencies<KV, TS, SZ, EP> {
    pub kv_store: KV,
    pub time_source: TS,
    pub serializer: SZ,
    pub publisher: EP,
}

impl<KV, TS, SZ, EP> CertificateRegistryService<KV, TS, SZ, EP>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SZ: StateSerializer,
    EP: EventPublisher,
{
    /// Open the registry held by `deps.kv_store`.
    ///
    /// An empty store is initialized with `genesis_owner`, which is persisted
    /// and announced as `OwnershipTransferred { previous: None, .. }`. A store
    /// that already holds a registry is loaded as is; `genesis_owner` is then
    /// ignored.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the store is empty and no usable genesis owner is
    /// given; `Storage` / `Serialization` if persisted data cannot be read.
    pub fn new(
        deps: RegistryDependencies<KV, TS, SZ, EP>,
        genesis_owner: Option<Principal>,
    ) -> RegistryResult<Self> {
        let mut service = Self {
            kv_store: deps.kv_store,
            time_source: deps.time_source,
            serializer: deps.serializer,
            publisher: deps.publisher,
            state: RegistryState::default(),
        };

        match service.load_state()? {
            Some(state) => {
                if genesis_owner.is_some_and(|owner| Some(owner) != state.access.current_owner()) {
                    warn!("[bc-01] Genesis owner ignored: registry already initialized");
                }
                info!(
                    "[bc-01] 📂 Registry loaded: {} issuers, {} certificates",
                    state.access.issuer_count(),
                    state.certificates.len()
                );
                service.state = state;
            }
            None => {
                let owner = genesis_owner.ok_or(RegistryError::InvalidArgument {
                    reason: "empty registry requires a genesis owner",
                })?;
                if owner.is_zero() {
                    return Err(RegistryError::InvalidArgument {
                        reason: "genesis owner is the null principal",
                    });
                }
                service.commit(Transition::new(
                    StateChange::Owner(Some(owner)),
                    RegistryEvent::OwnershipTransferred {
                        previous: None,
                        new: Some(owner),
                    },
                ))?;
                info!("[bc-01] 🌱 Registry initialized with owner {}", owner);
            }
        }

        Ok(service)
    }

    /// Read-only view of the tables.
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn certificate_count(&self) -> usize {
        self.state.certificates.len()
    }

    pub fn issuer_count(&self) -> usize {
        self.state.access.issuer_count()
    }

    pub fn publisher(&self) -> &EP {
        &self.publisher
    }

    pub fn kv_store(&self) -> &KV {
        &self.kv_store
    }

    /// Persist, apply, announce. Nothing is applied or announced if the write
    /// fails.
    fn commit(&mut self, transition: Transition) -> RegistryResult<()> {
        let Transition { change, event } = transition;

        if let Some(change) = change {
            let operation = self.encode_change(&change)?;
            self.kv_store.atomic_batch_write(vec![operation])?;
            self.state.apply(&change);
        }

        let name = event.name();
        let receivers = self.publisher.publish(event);
        debug!(event = name, receivers, "[bc-01] Event published");
        Ok(())
    }
}

fn rejected(operation: &'static str, caller: &Principal, error: &RegistryError) {
    warn!(
        operation,
        caller = %caller.short(),
        kind = ?error.kind(),
        "[bc-01] ❌ Rejected: {}",
        error
    );
}

impl<KV, TS, SZ, EP> CertificateRegistryApi for CertificateRegistryService<KV, TS, SZ, EP>
where
    KV: KeyValueStore,
    TS: TimeSource,
    SZ: StateSerializer,
    EP: EventPublisher,
{
    fn current_owner(&self) -> Option<Principal> {
        self.state.access.current_owner()
    }

    fn transfer_ownership(&mut self, caller: Principal, new_owner: Principal) -> RegistryResult<()> {
        self.state
            .access
            .plan_transfer_ownership(&caller, new_owner)
            .and_then(|t| self.commit(t))
            .inspect_err(|e| rejected("transfer_ownership", &caller, e))?;

        info!("[bc-01] 👑 Ownership transferred {} -> {}", caller, new_owner);
        Ok(())
    }

    fn renounce_ownership(&mut self, caller: Principal) -> RegistryResult<()> {
        self.state
            .access
            .plan_renounce_ownership(&caller)
            .and_then(|t| self.commit(t))
            .inspect_err(|e| rejected("renounce_ownership", &caller, e))?;

        info!("[bc-01] 👑 Ownership renounced by {}", caller);
        Ok(())
    }

    fn register_issuer(
        &mut self,
        caller: Principal,
        principal: Principal,
        name: String,
    ) -> RegistryResult<()> {
        self.state
            .access
            .plan_register_issuer(&caller, principal, name)
            .and_then(|t| self.commit(t))
            .inspect_err(|e| rejected("register_issuer", &caller, e))?;

        info!("[bc-01] 🏛️  Issuer registered: {}", principal);
        Ok(())
    }

    fn deactivate_issuer(&mut self, caller: Principal, principal: Principal) -> RegistryResult<()> {
        self.state
            .access
            .plan_deactivate_issuer(&caller, principal)
            .and_then(|t| self.commit(t))
            .inspect_err(|e| rejected("deactivate_issuer", &caller, e))?;

        info!("[bc-01] 🚫 Issuer deactivated: {}", principal);
        Ok(())
    }

    fn is_active_issuer(&self, principal: Principal) -> bool {
        self.state.access.is_active_issuer(&principal)
    }

    fn get_issuer(&self, principal: Principal) -> Option<IssuerEntry> {
        self.state.access.issuer(&principal).cloned()
    }

    fn create_certificate(
        &mut self,
        caller: Principal,
        subject_name: String,
        course_or_subject: String,
        hash: String,
    ) -> RegistryResult<CertificateRecord> {
        let now = self.time_source.now();
        let certificate = NewCertificate {
            subject_name,
            course_or_subject,
            hash: hash.clone(),
        };

        self.state
            .certificates
            .plan_create(&self.state.access, &caller, certificate, now)
            .and_then(|t| self.commit(t))
            .inspect_err(|e| rejected("create_certificate", &caller, e))?;

        let record = self
            .state
            .certificates
            .get(&hash)
            .cloned()
            .ok_or_else(|| RegistryError::Storage {
                message: format!("certificate {} missing after commit", hash),
            })?;

        info!(
            "[bc-01] 📜 Certificate issued: {} by {}",
            record.hash, record.issuer_name
        );
        Ok(record)
    }

    fn verify_certificate(&self, hash: &str) -> Verification {
        self.state.certificates.verify(hash)
    }
}
