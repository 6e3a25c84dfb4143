//! Domain layer: topology model, per-type defaults, bootstrap command
//! descriptors, and the error taxonomy. Pure data and rendering, no I/O.

pub mod commands;
pub mod defaults;
pub mod errors;
pub mod topology;

pub use commands::{
    BootstrapCommand, BootstrapPaths, BulkAppendCommand, CreateCommand, FetchCommand,
};
pub use errors::{OrchestrationError, RegistryError};
pub use topology::{ConnectionParams, NodeType, Peer, PeerGroup, Topology};
