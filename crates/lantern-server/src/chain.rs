//! Consensus RPC client for block facts.
//!
//! Fetches each monitored service's first block (`/block?height=1`) to
//! derive the height and earliest-block-time labels of the block gauge. A
//! slow or unreachable service costs at most the client timeout and skips
//! that sample, never the cycle.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::warn;

/// Height and timestamp of a service's first block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarliestBlock {
    /// Block height as reported by the service.
    pub height: String,
    /// RFC3339 block timestamp.
    pub time: String,
}

/// HTTP client over the consensus RPC endpoints.
pub struct ChainClient {
    client: Client,
}

impl ChainClient {
    /// Build the client with short per-request timeouts.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .build()?;
        Ok(Self { client })
    }

    /// Query `service` for its first block; `None` when the service is
    /// unreachable or answers with an unexpected shape.
    pub async fn earliest_block(&self, service: &str, rpc_port: u16) -> Option<EarliestBlock> {
        let url = format!("http://{service}:{rpc_port}/block?height=1");
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(%url, %error, "block query failed");
                return None;
            }
        };
        let value: Value = match response.json().await {
            Ok(value) => value,
            Err(error) => {
                warn!(%url, %error, "block response is not JSON");
                return None;
            }
        };
        Self::parse_block_header(&value).or_else(|| {
            warn!(%url, "block response missing header fields");
            None
        })
    }

    fn parse_block_header(value: &Value) -> Option<EarliestBlock> {
        let header = value.get("result")?.get("block")?.get("header")?;
        Some(EarliestBlock {
            height: header.get("height")?.as_str()?.to_string(),
            time: header.get("time")?.as_str()?.to_string(),
        })
    }
}
