//! Server configuration: one TOML file declaring the mutual-peer topology
//! alongside the process settings, with environment overrides on top.

use std::env;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use lantern_core::{BootstrapPaths, PeerGroup, Topology};

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_registry_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_registry_timeout_secs() -> u64 {
    30
}

fn default_observe_interval_secs() -> u64 {
    30
}

fn default_namespace() -> String {
    "default".to_string()
}

/// Process settings plus the declarative topology.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the control API listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// URL of the registry store.
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Bound on a single registry read, in seconds.
    #[serde(default = "default_registry_timeout_secs")]
    pub registry_timeout_secs: u64,

    /// Period of the observability callback, in seconds.
    #[serde(default = "default_observe_interval_secs")]
    pub observe_interval_secs: u64,

    /// Namespace label applied to published samples when a peer declares
    /// none of its own.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Filesystem layout used by the bootstrap commands.
    #[serde(default)]
    pub bootstrap: BootstrapPaths,

    /// Declared mutual-peer groups.
    #[serde(default)]
    pub peer_groups: Vec<PeerGroup>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            registry_url: default_registry_url(),
            registry_timeout_secs: default_registry_timeout_secs(),
            observe_interval_secs: default_observe_interval_secs(),
            namespace: default_namespace(),
            bootstrap: BootstrapPaths::default(),
            peer_groups: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config = Self::from_toml(&raw)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse from a TOML string.
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("parsing config file")
    }

    /// Environment variables win over the file:
    /// `LANTERN_LISTEN_ADDR`, `LANTERN_REGISTRY_URL`, `LANTERN_NAMESPACE`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("LANTERN_LISTEN_ADDR") {
            self.listen_addr = value;
        }
        if let Ok(value) = env::var("LANTERN_REGISTRY_URL") {
            self.registry_url = value;
        }
        if let Ok(value) = env::var("LANTERN_NAMESPACE") {
            self.namespace = value;
        }
    }

    /// The declared topology, owned by the process for its lifetime.
    pub fn topology(&self) -> Topology {
        Topology {
            peer_groups: self.peer_groups.clone(),
        }
    }
}
