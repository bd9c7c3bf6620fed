//! Logging of registry events.

use shared_bus::{EventStream, RegistryEvent};
use tokio_stream::StreamExt;
use tracing::info;

/// One-line summary of an event.
pub fn describe_event(event: &RegistryEvent) -> String {
    match event {
        RegistryEvent::OwnershipTransferred { previous, new } => format!(
            "{} -> {}",
            previous.map_or_else(|| "none".to_string(), |p| p.to_string()),
            new.map_or_else(|| "none".to_string(), |p| p.to_string())
        ),
        RegistryEvent::IssuerRegistered { principal, name } => format!("{} \"{}\"", principal, name),
        RegistryEvent::IssuerDeactivated { principal, name } => match name {
            Some(name) => format!("{} \"{}\"", principal, name),
            None => format!("{} (not registered)", principal),
        },
        RegistryEvent::CertificateIssued { hash, issuer } => format!("{} by {}", hash, issuer),
    }
}

/// Log every event on `stream` until the bus is dropped. Returns the count.
pub async fn log_events(mut stream: EventStream) -> u64 {
    let mut seen = 0;
    while let Some(published) = stream.next().await {
        seen += 1;
        info!(
            sequence = published.sequence,
            event = published.event.name(),
            "[bc-01] 📣 {}",
            describe_event(&published.event)
        );
    }
    seen
}
