//! Observability publisher: node facts as periodic callback-driven gauges.
//!
//! The publisher registers two gauge vectors and repopulates them from a
//! FRESH facts snapshot on every `observe()` call; nothing is captured at
//! registration time, so published samples can never go stale behind the
//! registry. A malformed timestamp degrades that one sample to a sentinel
//! age instead of failing the cycle.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prometheus::{GaugeVec, Opts, Registry};
use tracing::{debug, warn};

use crate::TelemetryError;

/// Age reported when the earliest-block timestamp cannot be parsed.
pub const UNPARSABLE_AGE: i64 = -1;

/// One multi-address presence sample, regenerated each cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiAddrFact {
    /// Service the address belongs to.
    pub service_name: String,
    /// Node name.
    pub node_name: String,
    /// The trusted-peer multi-address.
    pub multiaddr: String,
    /// Namespace the service is deployed in.
    pub namespace: String,
    /// Observed value.
    pub value: f64,
}

/// One block-height sample for a monitored service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFact {
    /// Service the sample belongs to.
    pub service_name: String,
    /// Height of the first block, as reported by the service.
    pub block_height: String,
    /// RFC3339 timestamp of the first block.
    pub earliest_block_time: String,
    /// Namespace the service is deployed in.
    pub namespace: String,
}

/// Read-only snapshot source for the publisher.
///
/// Implementations pull from the current topology and registry state; they
/// must be safe to call repeatedly and concurrently with other readers.
#[async_trait]
pub trait FactsSource: Send + Sync {
    /// Current multi-address facts, one per known peer address.
    async fn multiaddr_facts(&self) -> Vec<MultiAddrFact>;

    /// Current block facts, one per monitored service.
    async fn block_facts(&self) -> Vec<BlockFact>;
}

/// Publisher holding the two registered gauge vectors.
pub struct ObservabilityPublisher {
    multiaddr: GaugeVec,
    block_height: GaugeVec,
    source: Arc<dyn FactsSource>,
}

impl ObservabilityPublisher {
    /// Register the publisher's gauges on `registry`.
    pub fn register(
        registry: &Registry,
        source: Arc<dyn FactsSource>,
    ) -> Result<Self, TelemetryError> {
        let multiaddr = GaugeVec::new(
            Opts::new("multiaddr", "Lantern - MultiAddresses"),
            &["service_name", "node_name", "multiaddress", "namespace"],
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        registry
            .register(Box::new(multiaddr.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        let block_height = GaugeVec::new(
            Opts::new("block_height_1", "Lantern - BlockHeight"),
            &[
                "service_name",
                "block_height_1",
                "earliest_block_time",
                "days_running",
                "namespace",
            ],
        )
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        registry
            .register(Box::new(block_height.clone()))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

        Ok(Self {
            multiaddr,
            block_height,
            source,
        })
    }

    /// One observation cycle: pull a fresh snapshot and republish both
    /// gauge vectors. Invoked by an external periodic scheduler; safe to
    /// call repeatedly and concurrently with registry reads.
    pub async fn observe(&self) {
        let addr_facts = self.source.multiaddr_facts().await;
        debug!(samples = addr_facts.len(), "publishing multiaddr gauge");
        self.multiaddr.reset();
        for fact in &addr_facts {
            self.multiaddr
                .with_label_values(&[
                    &fact.service_name,
                    &fact.node_name,
                    &fact.multiaddr,
                    &fact.namespace,
                ])
                .set(fact.value);
        }

        let block_facts = self.source.block_facts().await;
        debug!(samples = block_facts.len(), "publishing block height gauge");
        self.block_height.reset();
        for fact in &block_facts {
            let days = days_difference(&fact.earliest_block_time);
            self.block_height
                .with_label_values(&[
                    &fact.service_name,
                    &fact.block_height,
                    &fact.earliest_block_time,
                    &days.to_string(),
                    &fact.namespace,
                ])
                .set(1.0);
        }
    }
}

/// Days elapsed since an RFC3339 timestamp (fractional seconds accepted).
///
/// Returns [`UNPARSABLE_AGE`] for a malformed timestamp so one bad sample
/// cannot abort the observation cycle it belongs to.
pub fn days_difference(timestamp: &str) -> i64 {
    days_difference_at(timestamp, Utc::now())
}

/// [`days_difference`] against an explicit "now", for deterministic tests.
pub fn days_difference_at(timestamp: &str, now: DateTime<Utc>) -> i64 {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => (now - parsed.with_timezone(&Utc)).num_days(),
        Err(error) => {
            warn!(timestamp, %error, "unparsable earliest block time");
            UNPARSABLE_AGE
        }
    }
}
