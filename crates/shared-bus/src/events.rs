//! # Registry Events
//!
//! Change notifications emitted by the certificate registry after a
//! mutation commits. Read-only operations never produce events.

use serde::{Deserialize, Serialize};
use shared_types::entities::{CertificateHash, Principal};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    // =========================================================================
    // ACCESS CONTROL
    // =========================================================================
    /// The owner role moved. `new` is `None` after renouncement.
    OwnershipTransferred {
        previous: Option<Principal>,
        new: Option<Principal>,
    },

    /// An issuer was inserted or its entry overwritten.
    IssuerRegistered { principal: Principal, name: String },

    /// An issuer was soft-disabled.
    ///
    /// `name` is the stored name, or `None` when the principal was never
    /// registered (the call is then a no-op on state).
    IssuerDeactivated {
        principal: Principal,
        name: Option<String>,
    },

    // =========================================================================
    // CERTIFICATES
    // =========================================================================
    /// A certificate record was created.
    CertificateIssued {
        hash: CertificateHash,
        issuer: Principal,
    },
}

impl RegistryEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::OwnershipTransferred { .. } => EventTopic::Ownership,
            Self::IssuerRegistered { .. } | Self::IssuerDeactivated { .. } => EventTopic::Issuers,
            Self::CertificateIssued { .. } => EventTopic::Certificates,
        }
    }

    /// Stable event name, used in logs and JSON output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::IssuerRegistered { .. } => "IssuerRegistered",
            Self::IssuerDeactivated { .. } => "IssuerDeactivated",
            Self::CertificateIssued { .. } => "CertificateIssued",
        }
    }
}

/// An event as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedEvent {
    /// Bus-local sequence number, starting at 1.
    pub sequence: u64,
    /// The event payload.
    pub event: RegistryEvent,
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Owner changes.
    Ownership,
    /// Issuer whitelist changes.
    Issuers,
    /// Certificate creation.
    Certificates,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
