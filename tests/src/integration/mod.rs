//! Shared harness: a control API served on an ephemeral port over in-memory
//! collaborators, plus topology builders used across scenarios.

mod bootstrap_flow;
mod control_api;
mod observability;

use std::sync::Arc;

use lantern_core::testing::{InMemoryRegistry, RecordingEnvWiring, RecordingExecutor};
use lantern_core::{ConfigurationOrchestrator, ConnectionParams, NodeType, Peer, PeerGroup, Topology};
use lantern_server::http::build_router;
use lantern_server::state::AppState;
use lantern_telemetry::MetricsHandle;

/// A running control API with handles to every collaborator double.
pub struct Harness {
    pub registry: Arc<InMemoryRegistry>,
    pub executor: Arc<RecordingExecutor>,
    pub wiring: Arc<RecordingEnvWiring>,
    pub metrics: Arc<MetricsHandle>,
    base_url: String,
}

impl Harness {
    /// Serve the API for `topology` on an ephemeral local port.
    pub async fn start(topology: Topology) -> Self {
        Self::start_with_metrics(topology, Arc::new(MetricsHandle::new())).await
    }

    /// Same, over a caller-owned metrics registry.
    pub async fn start_with_metrics(topology: Topology, metrics: Arc<MetricsHandle>) -> Self {
        let registry = Arc::new(InMemoryRegistry::new());
        let executor = Arc::new(RecordingExecutor::new());
        let wiring = Arc::new(RecordingEnvWiring::new());
        let orchestrator = Arc::new(ConfigurationOrchestrator::new(
            Arc::clone(&wiring) as _,
            Arc::clone(&executor) as _,
        ));

        let state = AppState {
            topology: Arc::new(topology),
            registry: Arc::clone(&registry) as _,
            orchestrator,
            metrics: Arc::clone(&metrics),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = build_router(state);
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            registry,
            executor,
            wiring,
            metrics,
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a path on this harness.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// A DA peer on the bootstrap command path.
pub fn da_peer(name: &str) -> Peer {
    Peer {
        node_name: name.to_string(),
        node_type: NodeType::Da,
        connects_as_env_var: false,
        params: ConnectionParams::default(),
    }
}

/// A consensus peer, env-var wired or not.
pub fn consensus_peer(name: &str, connects_as_env_var: bool) -> Peer {
    Peer {
        node_name: name.to_string(),
        node_type: NodeType::Consensus,
        connects_as_env_var,
        params: ConnectionParams::default(),
    }
}

/// A single-group topology over the given peers.
pub fn topology_of(peers: Vec<Peer>) -> Topology {
    Topology {
        peer_groups: vec![PeerGroup { peers }],
    }
}
