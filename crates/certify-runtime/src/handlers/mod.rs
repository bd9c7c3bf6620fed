//! # Handlers
//!
//! - `commands` - runs one CLI command against the registry
//! - `events` - logs events published by the registry

pub mod commands;
pub mod events;

pub use commands::{execute, run_offline};
pub use events::{describe_event, log_events};
