//! # Registry State
//!
//! The two cooperating tables, owned together so a transition is applied to
//! exactly one place.

use super::access::AccessController;
use super::certificates::CertificateStore;
use super::transition::StateChange;
use shared_types::Principal;

/// Complete in-memory registry state.
#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    pub access: AccessController,
    pub certificates: CertificateStore,
}

impl RegistryState {
    /// Fresh state with `owner` and empty tables.
    pub fn genesis(owner: Principal) -> Self {
        Self {
            access: AccessController::new(owner),
            certificates: CertificateStore::new(),
        }
    }

    pub fn apply(&mut self, change: &StateChange) {
        match change {
            StateChange::Owner(_) | StateChange::Issuer { .. } => self.access.apply(change),
            StateChange::Certificate(_) => self.certificates.apply(change),
        }
    }
}
