//! Per-node configuration decision engine.
//!
//! For every request the orchestrator walks the same state machine,
//! recomputed from scratch (nothing is persisted between invocations):
//!
//! ```text
//! Validated → DefaultsApplied → { EnvVarConfigured | CommandConfigured } → Done
//!                 │                        │                  │
//!                 └────────────────────────┴──────────────────┴──→ Error
//! ```
//!
//! Dispatch matrix:
//! - `connects_as_env_var == true` (any type) → environment wiring path
//! - `Da` without env var → bootstrap command path (create, then bulk append)
//! - `Consensus` without env var → explicit unsupported-configuration error

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::commands::{BootstrapCommand, BootstrapPaths, BulkAppendCommand, CreateCommand};
use crate::domain::errors::OrchestrationError;
use crate::domain::topology::{NodeType, Peer, Topology};
use crate::ports::{CommandExecutor, EnvironmentWiring, ExecTarget};

/// Default bound on a single command dispatch.
pub const DEFAULT_EXEC_TIMEOUT: Duration = Duration::from_secs(30);

/// Terminal status of an orchestration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationStatus {
    /// All required configuration sub-steps succeeded.
    Ok,
    /// The node is not declared in the topology.
    NotFound,
    /// The node's type/mode combination has no configuration path.
    UnsupportedConfiguration,
    /// A configuration sub-step failed.
    InternalError,
}

/// Outcome of one orchestration request, consumed by the Control API and
/// discarded after the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Node the request was for.
    pub node_name: String,
    /// Terminal status.
    pub status: OrchestrationStatus,
    /// Node name on success, underlying cause otherwise.
    pub detail: String,
}

impl OrchestrationResult {
    fn ok(node_name: String) -> Self {
        Self {
            detail: node_name.clone(),
            node_name,
            status: OrchestrationStatus::Ok,
        }
    }

    fn from_error(node_name: String, err: &OrchestrationError) -> Self {
        let status = match err {
            OrchestrationError::NodeNotFound(_) => OrchestrationStatus::NotFound,
            OrchestrationError::UnsupportedConfiguration { .. } => {
                OrchestrationStatus::UnsupportedConfiguration
            }
            _ => OrchestrationStatus::InternalError,
        };
        Self {
            node_name,
            status,
            detail: err.to_string(),
        }
    }
}

/// The decision engine: applies per-type defaults, then dispatches a
/// validated node to the environment wiring or command execution path.
pub struct ConfigurationOrchestrator {
    env_wiring: Arc<dyn EnvironmentWiring>,
    executor: Arc<dyn CommandExecutor>,
    paths: BootstrapPaths,
    exec_timeout: Duration,
}

impl ConfigurationOrchestrator {
    /// Create an orchestrator over the given collaborators with the default
    /// bootstrap layout and command timeout.
    pub fn new(env_wiring: Arc<dyn EnvironmentWiring>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            env_wiring,
            executor,
            paths: BootstrapPaths::default(),
            exec_timeout: DEFAULT_EXEC_TIMEOUT,
        }
    }

    /// Override the bootstrap filesystem layout.
    pub fn with_paths(mut self, paths: BootstrapPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Override the per-command deadline.
    pub fn with_exec_timeout(mut self, timeout: Duration) -> Self {
        self.exec_timeout = timeout;
        self
    }

    /// Configure a validated peer, returning the terminal result.
    ///
    /// Never panics and never reports partial success: `Ok` is produced only
    /// after every required sub-step succeeded.
    pub async fn configure(&self, peer: &Peer, topology: &Topology) -> OrchestrationResult {
        match self.try_configure(peer, topology).await {
            Ok(()) => {
                info!(node = %peer.node_name, "node configured");
                OrchestrationResult::ok(peer.node_name.clone())
            }
            Err(err) => {
                error!(node = %peer.node_name, error = %err, "node configuration failed");
                OrchestrationResult::from_error(peer.node_name.clone(), &err)
            }
        }
    }

    async fn try_configure(
        &self,
        peer: &Peer,
        topology: &Topology,
    ) -> Result<(), OrchestrationError> {
        // Validated → DefaultsApplied
        let peer = peer.clone().with_defaults();

        // DefaultsApplied → EnvVarConfigured
        if peer.connects_as_env_var {
            info!(node = %peer.node_name, "node uses env var to connect");
            let wiring = self.env_wiring.setup_env_var_connections(&peer, topology);
            return match tokio::time::timeout(self.exec_timeout, wiring).await {
                Ok(result) => result.map_err(|source| OrchestrationError::EnvWiring {
                    name: peer.node_name.clone(),
                    source,
                }),
                Err(_) => Err(OrchestrationError::Timeout {
                    name: peer.node_name.clone(),
                    seconds: self.exec_timeout.as_secs(),
                }),
            };
        }

        // DefaultsApplied → CommandConfigured
        match peer.node_type {
            NodeType::Da => self.configure_da_node(&peer).await,
            NodeType::Consensus => Err(OrchestrationError::UnsupportedConfiguration {
                name: peer.node_name.clone(),
                node_type: peer.node_type,
            }),
        }
    }

    /// Command path for DA nodes: establish the trusted-peer address, then
    /// publish it into the shared aggregate file.
    async fn configure_da_node(&self, peer: &Peer) -> Result<(), OrchestrationError> {
        let target = ExecTarget::for_peer(peer);

        let create = BootstrapCommand::Create(CreateCommand::new(&self.paths, &peer.params));
        let output = self.execute_bounded(&target, &create, &peer.node_name).await?;

        let address = output.trim();
        if address.is_empty() {
            return Err(OrchestrationError::EmptyBootstrapOutput {
                name: peer.node_name.clone(),
            });
        }
        info!(node = %peer.node_name, address, "trusted peer address established");

        let bulk = BootstrapCommand::BulkAppend(BulkAppendCommand::new(&self.paths, address));
        self.execute_bounded(&target, &bulk, &peer.node_name).await?;
        Ok(())
    }

    async fn execute_bounded(
        &self,
        target: &ExecTarget,
        command: &BootstrapCommand,
        name: &str,
    ) -> Result<String, OrchestrationError> {
        match tokio::time::timeout(self.exec_timeout, self.executor.execute(target, command)).await
        {
            Ok(result) => result.map_err(|source| OrchestrationError::Execution {
                name: name.to_string(),
                source,
            }),
            Err(_) => Err(OrchestrationError::Timeout {
                name: name.to_string(),
                seconds: self.exec_timeout.as_secs(),
            }),
        }
    }
}
