//! Application state shared across handlers.

use std::sync::Arc;

use lantern_core::{ConfigurationOrchestrator, RegistryStore, Topology};
use lantern_telemetry::MetricsHandle;

/// State cloned into every handler.
///
/// The topology is owned by the process and read-only for its lifetime; the
/// registry holds no cache of its own.
#[derive(Clone)]
pub struct AppState {
    /// Declared mutual-peer topology.
    pub topology: Arc<Topology>,
    /// Bounded-latency registry client.
    pub registry: Arc<dyn RegistryStore>,
    /// Per-node configuration decision engine.
    pub orchestrator: Arc<ConfigurationOrchestrator>,
    /// Constructed metrics registry, served on `/metrics`.
    pub metrics: Arc<MetricsHandle>,
}
