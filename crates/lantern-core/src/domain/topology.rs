//! Declarative mutual-peer topology.
//!
//! The topology is loaded once at startup, treated as immutable for the
//! lifetime of the process, and shared read-only across all components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The archetype of a node, driving default connection parameters and the
/// available configuration paths.
///
/// Matches on this enum are kept exhaustive on purpose: adding a variant must
/// fail to compile until every dispatch site handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Data-availability node. Supports both env-var wiring and the remote
    /// bootstrap command path.
    Da,
    /// Consensus node. Supports env-var wiring only.
    Consensus,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Da => write!(f, "da"),
            Self::Consensus => write!(f, "consensus"),
        }
    }
}

/// Type-specific connection parameters.
///
/// All fields are optional in the declaration; unset fields are filled from
/// the per-type default set before orchestration (see [`crate::domain::defaults`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    /// Container inside the node's pod that commands are dispatched to.
    pub container_name: Option<String>,
    /// Node store path used by the node CLI for the admin token exchange.
    pub node_store: Option<String>,
    /// Local RPC port answering `p2p.Info` requests.
    pub rpc_port: Option<u16>,
    /// Namespace the node's service is deployed in.
    pub namespace: Option<String>,
}

/// A single node participating in one or more mutual-peer groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// Node name, unique within the topology.
    pub node_name: String,
    /// Node archetype.
    pub node_type: NodeType,
    /// When true, the peer relationship is wired through environment
    /// variables instead of the remote bootstrap command path.
    #[serde(default)]
    pub connects_as_env_var: bool,
    /// Type-specific connection parameters.
    #[serde(default)]
    pub params: ConnectionParams,
}

/// A group of nodes that must trust each other's network identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerGroup {
    /// Participating peers.
    pub peers: Vec<Peer>,
}

/// Ordered collection of mutual-peer group declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Declared groups, in declaration order.
    #[serde(default)]
    pub peer_groups: Vec<PeerGroup>,
}

impl Topology {
    /// Resolve a node name against the declared groups.
    ///
    /// Scans groups in declaration order; the first match wins. Names are
    /// expected to be unique, so duplicates resolve to the earliest
    /// declaration. Runs in O(total peers), no side effects.
    pub fn find_peer(&self, name: &str) -> Option<&Peer> {
        self.peer_groups
            .iter()
            .flat_map(|group| group.peers.iter())
            .find(|peer| peer.node_name == name)
    }

    /// All peers sharing at least one group with `name`, excluding the node
    /// itself. Used by the environment wiring path, which must connect a node
    /// to every one of its mutual peers.
    pub fn mutual_peers_of(&self, name: &str) -> Vec<&Peer> {
        let mut mutual = Vec::new();
        for group in &self.peer_groups {
            if group.peers.iter().any(|p| p.node_name == name) {
                for peer in &group.peers {
                    if peer.node_name != name
                        && !mutual
                            .iter()
                            .any(|m: &&Peer| m.node_name == peer.node_name)
                    {
                        mutual.push(peer);
                    }
                }
            }
        }
        mutual
    }

    /// Iterator over every declared peer, in declaration order.
    pub fn peers(&self) -> impl Iterator<Item = &Peer> {
        self.peer_groups.iter().flat_map(|group| group.peers.iter())
    }
}
