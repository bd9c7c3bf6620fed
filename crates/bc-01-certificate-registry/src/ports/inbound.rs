//! # Inbound Ports (Driving Ports)
//!
//! The fixed set of entry points external collaborators call.

use crate::domain::entities::{CertificateRecord, IssuerEntry, Verification};
use crate::domain::errors::RegistryResult;
use shared_types::Principal;

/// Primary Certificate Registry API.
///
/// Mutations take the authenticated `caller` as their first argument; the
/// registry knows nothing else about how the caller was authenticated.
/// Reads perform no access check.
pub trait CertificateRegistryApi {
    // === Access control ===

    /// Active owner, or `None` after renouncement.
    fn current_owner(&self) -> Option<Principal>;

    /// Hand the owner role to `new_owner`.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the owner; `InvalidArgument` for the
    /// null principal.
    fn transfer_ownership(&mut self, caller: Principal, new_owner: Principal) -> RegistryResult<()>;

    /// Give up the owner role for good.
    fn renounce_ownership(&mut self, caller: Principal) -> RegistryResult<()>;

    /// Insert or overwrite an active issuer entry.
    fn register_issuer(
        &mut self,
        caller: Principal,
        principal: Principal,
        name: String,
    ) -> RegistryResult<()>;

    /// Soft-disable an issuer. Unknown principals succeed without effect.
    fn deactivate_issuer(&mut self, caller: Principal, principal: Principal) -> RegistryResult<()>;

    fn is_active_issuer(&self, principal: Principal) -> bool;

    /// Stored entry, active or not.
    fn get_issuer(&self, principal: Principal) -> Option<IssuerEntry>;

    // === Certificates ===

    /// Create the record for `hash`. Exactly one call per hash ever succeeds.
    ///
    /// # Errors
    /// Checked in order: `Unauthorized`, `InvalidArgument` (empty hash),
    /// `AlreadyExists`.
    fn create_certificate(
        &mut self,
        caller: Principal,
        subject_name: String,
        course_or_subject: String,
        hash: String,
    ) -> RegistryResult<CertificateRecord>;

    /// Look up a record. Callable by anyone, no side effects.
    fn verify_certificate(&self, hash: &str) -> Verification;
}
