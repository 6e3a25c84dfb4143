//! # Driven Ports (Outbound SPI)
//!
//! Interfaces this crate **requires** the host application to implement:
//! environment wiring, command execution, and the key-value registry.
//!
//! # Thread Safety
//!
//! All implementations must be `Send + Sync`; Control API requests run
//! concurrently with each other and with the observability callback.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::commands::BootstrapCommand;
use crate::domain::errors::RegistryError;
use crate::domain::topology::{Peer, Topology};

/// Where a bootstrap command runs: a named node and the container inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecTarget {
    /// Node (pod) name.
    pub node_name: String,
    /// Container the command is dispatched to.
    pub container: String,
}

impl ExecTarget {
    /// Build the execution target for a peer, using its (defaulted)
    /// container name.
    pub fn for_peer(peer: &Peer) -> Self {
        Self {
            node_name: peer.node_name.clone(),
            container: peer
                .params
                .container_name
                .clone()
                .unwrap_or_else(|| peer.node_type.to_string()),
        }
    }
}

impl fmt::Display for ExecTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.node_name, self.container)
    }
}

/// Failure reported by the environment wiring capability.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EnvWiringError {
    /// Human-readable cause.
    pub message: String,
}

impl EnvWiringError {
    /// Convenience constructor.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by the command executor.
#[derive(Debug, Clone, Error)]
#[error("command failed on [{target}]: {message}")]
pub struct ExecutionError {
    /// Target the command was dispatched to.
    pub target: String,
    /// Executor-reported cause, including any captured output.
    pub message: String,
}

impl ExecutionError {
    /// Convenience constructor.
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Capability that wires a node to its mutual peers through environment
/// variables.
///
/// The implementation must set up all named environment connections for
/// every mutual peer of the given node; a partial setup must be reported as
/// a failure.
#[async_trait]
pub trait EnvironmentWiring: Send + Sync {
    /// Wire `peer` to each of its mutual peers in `topology`.
    async fn setup_env_var_connections(
        &self,
        peer: &Peer,
        topology: &Topology,
    ) -> Result<(), EnvWiringError>;
}

/// Capability that runs a bootstrap command inside a node's execution
/// environment and returns its stdout.
///
/// Cancellation and transport-level timeouts are the implementation's
/// concern; the orchestrator additionally caps each call with its own
/// deadline.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute `command` on `target`, returning captured output.
    async fn execute(
        &self,
        target: &ExecTarget,
        command: &BootstrapCommand,
    ) -> Result<String, ExecutionError>;
}

/// Bounded-latency accessor for the external key-value registry holding
/// last-known node addresses.
///
/// Every call must be bounded: if the store does not respond in time the
/// implementation returns [`RegistryError::Timeout`] rather than hanging.
/// An absent key is `Ok(None)`, never an error.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Look up the address stored for `name`.
    async fn get(&self, name: &str) -> Result<Option<String>, RegistryError>;

    /// Fetch every stored entry, keyed by node name.
    async fn get_all(&self) -> Result<HashMap<String, String>, RegistryError>;
}
