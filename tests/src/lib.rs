//! # BlockCertify Test Suite
//!
//! Unified test crate for behavior that spans crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # Registry + event bus + storage end to end
//!     └── properties.rs  # Randomized operation sequences against a model
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bc-tests
//! cargo test -p bc-tests integration::properties::
//! ```

pub mod integration;
