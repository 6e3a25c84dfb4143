//! Error taxonomy for orchestration and registry access.

use thiserror::Error;

use super::topology::NodeType;
use crate::ports::{EnvWiringError, ExecutionError};

/// Errors produced while configuring a node's peer connections.
///
/// `NodeNotFound` maps to a 404 at the API boundary; everything else is an
/// internal error. No variant is retried by this crate.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The requested node is not declared in the topology.
    #[error("error: Pod doesn't exists in the config")]
    NodeNotFound(String),

    /// The node's type/mode combination has no defined configuration path.
    #[error("node [{name}] of type {node_type} has no remote configuration path without env var wiring")]
    UnsupportedConfiguration {
        /// Node name.
        name: String,
        /// Declared node type.
        node_type: NodeType,
    },

    /// The environment wiring collaborator failed. Terminal, no partial retry.
    #[error("environment wiring failed for [{name}]: {source}")]
    EnvWiring {
        /// Node name.
        name: String,
        /// Underlying wiring failure.
        source: EnvWiringError,
    },

    /// A bootstrap command failed in the node's execution environment.
    #[error("bootstrap command failed for [{name}]: {source}")]
    Execution {
        /// Node name.
        name: String,
        /// Executor-reported failure, with whatever output was available.
        source: ExecutionError,
    },

    /// A bootstrap command exceeded the orchestrator's bounded wait.
    #[error("bootstrap command for [{name}] exceeded {seconds}s")]
    Timeout {
        /// Node name.
        name: String,
        /// Configured bound.
        seconds: u64,
    },

    /// The create command returned no trusted-peer address.
    #[error("bootstrap produced no trusted peer address for [{name}]")]
    EmptyBootstrapOutput {
        /// Node name.
        name: String,
    },
}

/// Errors from the bounded-latency registry client.
///
/// An absent key is NOT an error; `RegistryStore::get` returns `Ok(None)` so
/// callers can always tell "absent" from "store unreachable".
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The store did not respond within the configured bound.
    #[error("registry read exceeded {seconds}s")]
    Timeout {
        /// Configured bound.
        seconds: u64,
    },

    /// Transport or protocol failure talking to the store.
    #[error("registry store error: {0}")]
    Store(String),
}
