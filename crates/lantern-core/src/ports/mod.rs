//! Ports layer: trait definitions for the external collaborators the
//! orchestrator depends on.

pub mod outbound;

pub use outbound::{
    CommandExecutor, EnvWiringError, EnvironmentWiring, ExecTarget, ExecutionError, RegistryStore,
};
