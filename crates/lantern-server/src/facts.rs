//! Facts source for the observability publisher.
//!
//! Every call takes a fresh read-only snapshot of the topology and registry;
//! nothing is cached between observation cycles.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use lantern_core::domain::defaults::CONSENSUS_RPC_PORT;
use lantern_core::{NodeType, RegistryStore, Topology};
use lantern_telemetry::{BlockFact, FactsSource, MultiAddrFact};

use crate::chain::ChainClient;

/// Facts pulled from the topology, registry, and consensus RPC endpoints.
pub struct ServerFactsSource {
    topology: Arc<Topology>,
    registry: Arc<dyn RegistryStore>,
    chain: ChainClient,
    namespace: String,
}

impl ServerFactsSource {
    /// Build the source over the process topology and registry.
    pub fn new(
        topology: Arc<Topology>,
        registry: Arc<dyn RegistryStore>,
        namespace: String,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            topology,
            registry,
            chain: ChainClient::new()?,
            namespace,
        })
    }

    fn namespace_of(&self, declared: &Option<String>) -> String {
        declared.clone().unwrap_or_else(|| self.namespace.clone())
    }
}

#[async_trait]
impl FactsSource for ServerFactsSource {
    async fn multiaddr_facts(&self) -> Vec<MultiAddrFact> {
        let entries = match self.registry.get_all().await {
            Ok(entries) => entries,
            Err(error) => {
                // One failed snapshot skips the cycle for this gauge only.
                warn!(%error, "registry snapshot failed");
                return Vec::new();
            }
        };

        self.topology
            .peers()
            .filter_map(|peer| {
                entries.get(&peer.node_name).map(|address| MultiAddrFact {
                    service_name: peer.node_name.clone(),
                    node_name: peer.node_name.clone(),
                    multiaddr: address.clone(),
                    namespace: self.namespace_of(&peer.params.namespace),
                    value: 1.0,
                })
            })
            .collect()
    }

    async fn block_facts(&self) -> Vec<BlockFact> {
        let mut facts = Vec::new();
        for peer in self
            .topology
            .peers()
            .filter(|peer| peer.node_type == NodeType::Consensus)
        {
            let rpc_port = peer.params.rpc_port.unwrap_or(CONSENSUS_RPC_PORT);
            if let Some(block) = self.chain.earliest_block(&peer.node_name, rpc_port).await {
                facts.push(BlockFact {
                    service_name: peer.node_name.clone(),
                    block_height: block.height,
                    earliest_block_time: block.time,
                    namespace: self.namespace_of(&peer.params.namespace),
                });
            }
        }
        facts
    }
}
