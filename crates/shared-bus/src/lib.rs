//! # Shared Bus - Registry Change Notifications
//!
//! Every committed registry mutation produces exactly one `RegistryEvent`.
//! The bus fans those events out to external indexers.
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────┐
//! │ Registry Engine  │                    │   Indexer    │
//! │                  │    publish()       │              │
//! │                  │ ──────┐            │              │
//! └──────────────────┘       │            └──────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! ## Guarantees
//!
//! - Events are published only after the state change is durable.
//! - Each published event carries a bus-local, strictly increasing sequence
//!   number so indexers can detect gaps after lagging.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, PublishedEvent, RegistryEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
