//! # satelhostd — Satel binding host daemon
//!
//! Composition root that wires the handler factory to an in-process host.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the host-side port implementations (adapters)
//! - Construct the handler factory, injecting them
//! - Instantiate the bridges and things listed in the things file
//! - Run a discovery scan per bridge
//! - On Ctrl-C, remove every handler so discovery services are withdrawn
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no binding logic belongs here.

mod config;
mod things;

use std::sync::Arc;

use satel_adapter_host_memory::{InMemoryServiceRegistry, StaticThingTypeProvider};
use satel_adapter_serialport::SystemSerialPorts;
use satel_app::factory::SatelHandlerFactory;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::things::ThingsFile;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Host side
    let registry = InMemoryServiceRegistry::new();
    let thing_types = Arc::new(StaticThingTypeProvider::default());
    let serial_ports = Arc::new(SystemSerialPorts::new());

    // Binding
    let factory = SatelHandlerFactory::new(registry.clone(), thing_types, serial_ports);

    let file = ThingsFile::load(&config.things.path)?;
    let handlers = things::instantiate(&factory, &file);
    tracing::info!(
        handlers = handlers.len(),
        discovery_services = factory.registrations().len(),
        "things instantiated"
    );

    if config.discovery.scan_on_start {
        for service in registry.services() {
            let supported: Vec<String> = service
                .supported_thing_types()
                .iter()
                .map(ToString::to_string)
                .collect();
            tracing::debug!(bridge = %service.bridge_uid(), ?supported, "scanning");
            match service.start_scan() {
                Ok(results) => {
                    for result in results {
                        tracing::info!(
                            thing = %result.thing_uid,
                            bridge = %result.bridge_uid,
                            label = %result.label,
                            "discovered"
                        );
                    }
                }
                Err(err) => {
                    tracing::warn!(bridge = %service.bridge_uid(), error = %err, "scan failed");
                }
            }
        }
    }

    tracing::info!("satelhostd running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    registry.close();
    for handler in &handlers {
        factory.remove_handler(handler);
    }
    factory.shutdown();
    tracing::info!(remaining = registry.len(), "satelhostd stopped");

    Ok(())
}
