//! Lantern control API entry point.
//!
//! Startup sequence:
//! 1. Parse CLI arguments and initialize logging
//! 2. Load the topology + settings file (env overrides win)
//! 3. Wire the orchestrator core against its collaborators
//! 4. Register the observability publisher and start its scheduler
//! 5. Serve the control API until a shutdown signal arrives

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use lantern_core::{
    ConfigurationOrchestrator, DisabledEnvWiring, LocalProcessExecutor, RedisRegistry,
    RegistryStore,
};
use lantern_server::config::ServerConfig;
use lantern_server::facts::ServerFactsSource;
use lantern_server::http;
use lantern_server::state::AppState;
use lantern_telemetry::{MetricsHandle, ObservabilityPublisher};

/// Peer connection orchestrator for a fleet of blockchain nodes.
#[derive(Debug, Parser)]
#[command(name = "lantern", version, about)]
struct Args {
    /// Path to the topology + settings file.
    #[arg(short, long, default_value = "lantern.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    lantern_telemetry::init_logging("info")?;

    let config = ServerConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    info!(
        peers = config.topology().peers().count(),
        registry = %config.registry_url,
        "lantern starting"
    );

    let topology = Arc::new(config.topology());
    let registry: Arc<dyn RegistryStore> = Arc::new(
        RedisRegistry::open(&config.registry_url)?
            .with_timeout(Duration::from_secs(config.registry_timeout_secs)),
    );
    let orchestrator = Arc::new(
        ConfigurationOrchestrator::new(
            Arc::new(DisabledEnvWiring::new()),
            Arc::new(LocalProcessExecutor::new()),
        )
        .with_paths(config.bootstrap.clone()),
    );

    let metrics = Arc::new(MetricsHandle::new());
    let facts = Arc::new(
        ServerFactsSource::new(
            Arc::clone(&topology),
            Arc::clone(&registry),
            config.namespace.clone(),
        )
        .context("building the facts source")?,
    );
    let publisher = ObservabilityPublisher::register(metrics.registry(), facts)?;

    // Periodic scheduler driving the observability callback.
    let observe_interval = Duration::from_secs(config.observe_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(observe_interval);
        loop {
            interval.tick().await;
            publisher.observe().await;
        }
    });

    let state = AppState {
        topology,
        registry,
        orchestrator,
        metrics,
    };
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "control API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving the control API")?;

    info!("lantern stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("received shutdown signal");
}
