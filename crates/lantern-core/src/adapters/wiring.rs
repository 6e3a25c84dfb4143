//! Placeholder environment wiring.
//!
//! Wiring env-var connections requires patching the fleet's workload
//! definitions, a capability owned by the host application. Deployments that
//! don't provide one get this adapter, which refuses the request instead of
//! reporting a success that never happened.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::topology::{Peer, Topology};
use crate::ports::{EnvWiringError, EnvironmentWiring};

/// Environment wiring stub that rejects every request.
#[derive(Debug, Default)]
pub struct DisabledEnvWiring;

impl DisabledEnvWiring {
    /// Create the stub.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnvironmentWiring for DisabledEnvWiring {
    async fn setup_env_var_connections(
        &self,
        peer: &Peer,
        _topology: &Topology,
    ) -> Result<(), EnvWiringError> {
        warn!(node = %peer.node_name, "env var wiring requested but no wiring capability is configured");
        Err(EnvWiringError::new(
            "environment wiring capability is not configured",
        ))
    }
}
