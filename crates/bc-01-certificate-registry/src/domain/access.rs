//! # Access Controller
//!
//! Owns the single-owner role and the issuer whitelist.
//!
//! ## Invariants
//!
//! - At most one owner at any time; zero after renouncement, permanently.
//! - Every whitelist mutation and every ownership change is owner-gated.
//! - Issuer rows are never removed, only deactivated.

use super::entities::IssuerEntry;
use super::errors::{RegistryError, RegistryResult};
use super::transition::{StateChange, Transition};
use shared_bus::RegistryEvent;
use shared_types::Principal;
use std::collections::HashMap;

/// Owner cell plus issuer table.
#[derive(Debug, Clone, Default)]
pub struct AccessController {
    owner: Option<Principal>,
    issuers: HashMap<Principal, IssuerEntry>,
}

impl AccessController {
    /// Controller with `owner` and an empty whitelist.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner: Some(owner),
            issuers: HashMap::new(),
        }
    }

    /// Rebuild from persisted tables.
    pub fn from_parts(owner: Option<Principal>, issuers: HashMap<Principal, IssuerEntry>) -> Self {
        Self { owner, issuers }
    }

    pub fn current_owner(&self) -> Option<Principal> {
        self.owner
    }

    pub fn issuer(&self, principal: &Principal) -> Option<&IssuerEntry> {
        self.issuers.get(principal)
    }

    pub fn issuer_count(&self) -> usize {
        self.issuers.len()
    }

    /// True iff `principal` has an entry and it is active.
    pub fn is_active_issuer(&self, principal: &Principal) -> bool {
        self.issuers.get(principal).is_some_and(|entry| entry.active)
    }

    // =========================================================================
    // GUARDS
    // =========================================================================

    /// Caller must be the current owner. Returns the owner on success.
    pub fn require_owner(&self, caller: &Principal) -> RegistryResult<Principal> {
        match self.owner {
            Some(owner) if owner == *caller => Ok(owner),
            _ => Err(RegistryError::Unauthorized { caller: *caller }),
        }
    }

    /// Caller must be an active issuer. Returns its entry on success.
    pub fn require_active_issuer(&self, caller: &Principal) -> RegistryResult<&IssuerEntry> {
        match self.issuers.get(caller) {
            Some(entry) if entry.active => Ok(entry),
            _ => Err(RegistryError::Unauthorized { caller: *caller }),
        }
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    pub fn plan_transfer_ownership(
        &self,
        caller: &Principal,
        new_owner: Principal,
    ) -> RegistryResult<Transition> {
        let previous = self.require_owner(caller)?;
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidArgument {
                reason: "new owner is the null principal",
            });
        }

        Ok(Transition::new(
            StateChange::Owner(Some(new_owner)),
            RegistryEvent::OwnershipTransferred {
                previous: Some(previous),
                new: Some(new_owner),
            },
        ))
    }

    pub fn plan_renounce_ownership(&self, caller: &Principal) -> RegistryResult<Transition> {
        let previous = self.require_owner(caller)?;

        Ok(Transition::new(
            StateChange::Owner(None),
            RegistryEvent::OwnershipTransferred {
                previous: Some(previous),
                new: None,
            },
        ))
    }

    /// Insert or overwrite `principal` as an active issuer named `name`.
    pub fn plan_register_issuer(
        &self,
        caller: &Principal,
        principal: Principal,
        name: String,
    ) -> RegistryResult<Transition> {
        self.require_owner(caller)?;
        if principal.is_zero() {
            return Err(RegistryError::InvalidArgument {
                reason: "issuer is the null principal",
            });
        }

        Ok(Transition::new(
            StateChange::Issuer {
                principal,
                entry: IssuerEntry::active(name.clone()),
            },
            RegistryEvent::IssuerRegistered { principal, name },
        ))
    }

    /// Soft-disable `principal`. Unknown principals succeed as a no-op.
    pub fn plan_deactivate_issuer(
        &self,
        caller: &Principal,
        principal: Principal,
    ) -> RegistryResult<Transition> {
        self.require_owner(caller)?;

        let Some(existing) = self.issuers.get(&principal) else {
            return Ok(Transition::no_op(RegistryEvent::IssuerDeactivated {
                principal,
                name: None,
            }));
        };

        let entry = IssuerEntry {
            name: existing.name.clone(),
            active: false,
        };
        Ok(Transition::new(
            StateChange::Issuer {
                principal,
                entry,
            },
            RegistryEvent::IssuerDeactivated {
                principal,
                name: Some(existing.name.clone()),
            },
        ))
    }

    // =========================================================================
    // APPLY
    // =========================================================================

    /// Apply a validated owner or issuer change. Certificate changes are
    /// ignored here.
    pub fn apply(&mut self, change: &StateChange) {
        match change {
            StateChange::Owner(owner) => self.owner = *owner,
            StateChange::Issuer { principal, entry } => {
                self.issuers.insert(*principal, entry.clone());
            }
            StateChange::Certificate(_) => {}
        }
    }
}
