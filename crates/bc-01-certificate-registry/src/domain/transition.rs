//! # State Transitions
//!
//! Mutations are validated against the current state first and only then
//! applied. A validated `Transition` is what the service persists, applies
//! and announces; nothing touches the tables before validation succeeds.

use super::entities::{CertificateRecord, IssuerEntry};
use shared_bus::RegistryEvent;
use shared_types::Principal;

/// A single row-level change to one of the three registry tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// New value of the owner cell. `None` after renouncement.
    Owner(Option<Principal>),
    /// Insert or overwrite an issuer row.
    Issuer {
        principal: Principal,
        entry: IssuerEntry,
    },
    /// Insert a certificate row. Never an overwrite.
    Certificate(CertificateRecord),
}

/// A validated mutation and the event announcing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// `None` when the operation succeeds without touching state.
    pub change: Option<StateChange>,
    pub event: RegistryEvent,
}

impl Transition {
    pub fn new(change: StateChange, event: RegistryEvent) -> Self {
        Self {
            change: Some(change),
            event,
        }
    }

    /// Successful call with no state effect.
    pub fn no_op(event: RegistryEvent) -> Self {
        Self {
            change: None,
            event,
        }
    }
}
