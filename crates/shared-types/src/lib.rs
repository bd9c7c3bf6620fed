//! # Shared Types Crate
//!
//! Identity and time primitives used by every BlockCertify crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Principal` is defined once and shared by the
//!   registry engine, the event bus and the runtime host.
//! - **Opaque Identity**: the registry compares principals by value only; it
//!   never inspects their bytes.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
