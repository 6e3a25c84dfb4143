//! # Lantern Server
//!
//! Control API and wiring for the peer connection orchestrator.
//!
//! The binary loads the declarative topology and server settings from one
//! TOML file, wires the orchestrator core against its collaborators, starts
//! the periodic observability scheduler, and serves the HTTP surface:
//!
//! - `GET /config` — current topology
//! - `GET /list` — all registry entries
//! - `GET /nodes/{nodeName}` — a node's trusted-peer address
//! - `POST /configure` — run the configuration orchestrator for a node
//! - `GET /health`, `GET /metrics` — liveness and Prometheus text

pub mod chain;
pub mod config;
pub mod facts;
pub mod http;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;
