//! Trusted-peer bootstrap command descriptors.
//!
//! Each descriptor is a parameterized value object rendered to a
//! `["sh", "-c", <script>]` argv vector at the execution boundary, so the
//! orchestrator and its tests can inspect a command's intent without running
//! it anywhere.
//!
//! Idempotence invariants:
//! - `Fetch` is a pure read.
//! - `Create` performs its token-exchange sequence at most once per node
//!   instance: the cache file is the serialization point, and it is promoted
//!   with an atomic `mv` only after the node identifier has been appended, so
//!   cache existence always implies a complete record.
//! - `BulkAppend` serializes the check-then-append on a lock file and never
//!   appends an address that is already present.

use serde::{Deserialize, Serialize};

use super::topology::ConnectionParams;
use crate::domain::defaults::{DA_NODE_STORE, DA_RPC_PORT};

/// Filesystem layout shared by all bootstrap commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapPaths {
    /// Per-node trusted-peer cache file. Existence means bootstrapped.
    pub cache_file: String,
    /// Shared directory holding the aggregate trusted-peers file.
    pub shared_dir: String,
    /// Address prefix written before the node identifier. Expanded by the
    /// node's own shell, hence the `$(hostname)`.
    pub prefix_template: String,
}

impl Default for BootstrapPaths {
    fn default() -> Self {
        Self {
            cache_file: "/tmp/TP-ADDR".to_string(),
            shared_dir: "/home/celestia/config".to_string(),
            prefix_template: "/dns/$(hostname)/tcp/2121/p2p/".to_string(),
        }
    }
}

/// Emit the cached trusted-peer address if present, nothing otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    /// Cache file to read.
    pub cache_file: String,
}

impl FetchCommand {
    /// Build a fetch command over the given layout.
    pub fn new(paths: &BootstrapPaths) -> Self {
        Self {
            cache_file: paths.cache_file.clone(),
        }
    }

    /// Render to an argv vector.
    pub fn to_argv(&self) -> Vec<String> {
        let script = format!(
            r#"#!/bin/sh
if [ -f "{cache}" ]; then
  cat "{cache}"
fi"#,
            cache = self.cache_file,
        );
        shell(script)
    }
}

/// Establish and publish the node's own trusted-peer address.
///
/// The token and node identifier can only be obtained from the node itself,
/// which is why this runs as a script inside the node's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommand {
    /// Cache file acting as the idempotence guard.
    pub cache_file: String,
    /// Address prefix written ahead of the node identifier.
    pub prefix: String,
    /// Node store path handed to the node CLI for the admin token.
    pub node_store: String,
    /// Local RPC port answering the `p2p.Info` request.
    pub rpc_port: u16,
}

impl CreateCommand {
    /// Build a create command, falling back to the DA defaults for any
    /// connection parameter the peer declaration left unset.
    pub fn new(paths: &BootstrapPaths, params: &ConnectionParams) -> Self {
        Self {
            cache_file: paths.cache_file.clone(),
            prefix: paths.prefix_template.clone(),
            node_store: params
                .node_store
                .clone()
                .unwrap_or_else(|| DA_NODE_STORE.to_string()),
            rpc_port: params.rpc_port.unwrap_or(DA_RPC_PORT),
        }
    }

    /// Render to an argv vector.
    ///
    /// The record is assembled in a sibling temp file and promoted with an
    /// atomic `mv` only once the identifier is appended; a failure anywhere
    /// in the sequence leaves no cache file behind.
    pub fn to_argv(&self) -> Vec<String> {
        let script = format!(
            r#"#!/bin/sh
if [ -f "{cache}" ]; then
  cat "{cache}"
else
  # assemble the record next to the cache, promote only when complete
  printf '%s' "{prefix}" > "{cache}.tmp"

  # generate the token
  AUTHTOKEN=$(celestia bridge auth admin --node.store {store})

  # keep the token itself, the CLI prepends a warning line
  AUTHTOKEN=$(echo $AUTHTOKEN | rev | cut -d' ' -f1 | rev)

  # make the request and parse the response
  TP_ID=$(wget --header="Authorization: Bearer $AUTHTOKEN" \
       --header="Content-Type: application/json" \
       --post-data='{{"jsonrpc":"2.0","id":0,"method":"p2p.Info","params":[]}}' \
       --output-document - \
       http://localhost:{port} | grep -o '"ID":"[^"]*"' | sed 's/"ID":"\([^"]*\)"/\1/')

  if [ -z "$TP_ID" ]; then
    rm -f "{cache}.tmp"
    exit 1
  fi

  printf '%s' "$TP_ID" >> "{cache}.tmp"
  mv "{cache}.tmp" "{cache}"
  cat "{cache}"
fi"#,
            cache = self.cache_file,
            prefix = self.prefix,
            store = self.node_store,
            port = self.rpc_port,
        );
        shell(script)
    }
}

/// Append a peer address to the shared aggregate trusted-peers file.
///
/// Multiple nodes may run this concurrently against the same shared volume;
/// the whole check-then-append runs under an `flock` on a sibling lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAppendCommand {
    /// Per-node cache file used to seed the aggregate file on first run.
    pub cache_file: String,
    /// Shared directory holding the aggregate file.
    pub shared_dir: String,
    /// Address to append.
    pub address: String,
}

impl BulkAppendCommand {
    /// Build a bulk-append command for the given address.
    pub fn new(paths: &BootstrapPaths, address: impl Into<String>) -> Self {
        Self {
            cache_file: paths.cache_file.clone(),
            shared_dir: paths.shared_dir.clone(),
            address: address.into(),
        }
    }

    /// Path of the aggregate file this command appends to.
    pub fn aggregate_file(&self) -> String {
        format!("{}/TRUSTED_PEERS", self.shared_dir)
    }

    /// Render to an argv vector.
    pub fn to_argv(&self) -> Vec<String> {
        let script = format!(
            r#"#!/bin/sh
# create the folder if it doesnt exist
mkdir -p "{dir}"

# seed, check and append under one lock; peers share this volume
flock "{dir}/TRUSTED_PEERS.lock" -c '
  if [ ! -f "{dir}/TRUSTED_PEERS" ]; then
    cp "{cache}" "{dir}/TRUSTED_PEERS"
  fi
  grep -qF "{addr}" "{dir}/TRUSTED_PEERS" || echo ",{addr}" >> "{dir}/TRUSTED_PEERS"
'"#,
            dir = self.shared_dir,
            cache = self.cache_file,
            addr = self.address,
        );
        shell(script)
    }
}

/// A dispatchable bootstrap command, tagged by intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapCommand {
    /// Read the cached address, if any.
    Fetch(FetchCommand),
    /// Establish the address via token exchange, at most once.
    Create(CreateCommand),
    /// Append an address to the shared aggregate file.
    BulkAppend(BulkAppendCommand),
}

impl BootstrapCommand {
    /// Render to the argv vector handed to the command executor.
    pub fn to_argv(&self) -> Vec<String> {
        match self {
            Self::Fetch(cmd) => cmd.to_argv(),
            Self::Create(cmd) => cmd.to_argv(),
            Self::BulkAppend(cmd) => cmd.to_argv(),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Create(_) => "create",
            Self::BulkAppend(_) => "bulk-append",
        }
    }
}

fn shell(script: String) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script]
}
