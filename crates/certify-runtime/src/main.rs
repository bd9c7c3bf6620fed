//! # certify
//!
//! Runs one command against the certificate registry.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `BC_*` environment, then flags)
//! 2. Validate configuration
//! 3. Install logging
//! 4. Open the store and load (or initialize) the registry
//! 5. Run the command while an event task logs what the registry emits
//! 6. Close the registry, drain the event task, print the output

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use shared_bus::{EventFilter, InMemoryEventBus};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use certify_runtime::handlers::{execute, log_events, run_offline};
use certify_runtime::{Cli, RegistryContainer, RuntimeConfig};

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Digest needs neither config nor storage.
    if let Some(output) = run_offline(&cli.command) {
        println!("{}", output);
        return Ok(());
    }

    let mut config = RuntimeConfig::from_env().context("invalid environment configuration")?;
    cli.global.apply_to(&mut config);
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(
        backend = %config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "[runtime] Opening certificate registry"
    );

    let bus = Arc::new(InMemoryEventBus::new());
    let events = tokio::spawn(log_events(bus.event_stream(EventFilter::all())));

    let output = {
        let mut container = RegistryContainer::open(&config, Arc::clone(&bus))?;
        execute(&mut container.registry, cli.command)
    };

    // Dropping the last bus handle ends the event stream.
    drop(bus);
    match events.await {
        Ok(count) => info!(count, "[runtime] Events emitted"),
        Err(e) => warn!("[runtime] Event logger failed: {}", e),
    }

    println!("{}", output?);
    Ok(())
}
