//! Per-node-type default connection parameters.
//!
//! A declaration only has to name what deviates from the archetype; anything
//! left unset is filled here before orchestration.

use super::topology::{NodeType, Peer};

/// Default container receiving bootstrap commands on a DA node.
pub const DA_CONTAINER: &str = "da";
/// Default node store path on a DA node.
pub const DA_NODE_STORE: &str = "/home/celestia";
/// Default local RPC port of a DA node.
pub const DA_RPC_PORT: u16 = 26658;

/// Default container on a consensus node.
pub const CONSENSUS_CONTAINER: &str = "consensus";
/// Default RPC port of a consensus node.
pub const CONSENSUS_RPC_PORT: u16 = 26657;

impl Peer {
    /// Return a copy of this peer with unset connection parameters filled
    /// from the type-specific default set. Explicitly declared values are
    /// never overridden.
    pub fn with_defaults(mut self) -> Peer {
        let params = &mut self.params;
        match self.node_type {
            NodeType::Da => {
                params
                    .container_name
                    .get_or_insert_with(|| DA_CONTAINER.to_string());
                params
                    .node_store
                    .get_or_insert_with(|| DA_NODE_STORE.to_string());
                params.rpc_port.get_or_insert(DA_RPC_PORT);
            }
            NodeType::Consensus => {
                params
                    .container_name
                    .get_or_insert_with(|| CONSENSUS_CONTAINER.to_string());
                params.rpc_port.get_or_insert(CONSENSUS_RPC_PORT);
            }
        }
        self
    }
}
