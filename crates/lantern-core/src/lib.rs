//! # Lantern Core
//!
//! Peer connection orchestration for a fleet of blockchain nodes.
//!
//! A declarative [`Topology`](domain::Topology) names the nodes that must
//! trust each other ("mutual peers"). For each node, the
//! [`ConfigurationOrchestrator`](service::ConfigurationOrchestrator) decides
//! how the peer relationship is wired: either through environment-variable
//! injection or by dispatching the idempotent trusted-peer bootstrap commands
//! to the node's execution environment. Discovered node identities are read
//! back through the [`RegistryStore`](ports::RegistryStore) port with
//! bounded-latency lookups.
//!
//! ## Architecture
//!
//! The crate follows the usual hexagonal split:
//! - **Domain layer:** topology model, per-type defaults, bootstrap command
//!   descriptors (pure data + rendering, no I/O)
//! - **Ports layer:** trait definitions for the environment wiring, command
//!   execution, and registry collaborators
//! - **Service layer:** the configuration orchestrator wiring domain to ports
//! - **Adapters layer:** Redis registry client, local process executor
//!
//! Test doubles for every port live in [`testing`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod testing;

// Domain re-exports
pub use domain::{
    BootstrapCommand, BootstrapPaths, BulkAppendCommand, ConnectionParams, CreateCommand,
    FetchCommand, NodeType, OrchestrationError, Peer, PeerGroup, RegistryError, Topology,
};

// Port traits
pub use ports::{
    CommandExecutor, EnvWiringError, EnvironmentWiring, ExecTarget, ExecutionError, RegistryStore,
};

// Service
pub use service::{ConfigurationOrchestrator, OrchestrationResult, OrchestrationStatus};

// Adapters
pub use adapters::{DisabledEnvWiring, LocalProcessExecutor, RedisRegistry};
