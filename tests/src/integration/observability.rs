//! Observability publisher scenarios: gauges land on /metrics, ages derive
//! from RFC3339 timestamps, and a bad timestamp never costs the cycle.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use lantern_telemetry::{
    days_difference_at, BlockFact, FactsSource, MetricsHandle, MultiAddrFact,
    ObservabilityPublisher, UNPARSABLE_AGE,
};

use super::{topology_of, Harness};

struct StaticFacts {
    addrs: Mutex<Vec<MultiAddrFact>>,
    blocks: Mutex<Vec<BlockFact>>,
}

impl StaticFacts {
    fn new(addrs: Vec<MultiAddrFact>, blocks: Vec<BlockFact>) -> Self {
        Self {
            addrs: Mutex::new(addrs),
            blocks: Mutex::new(blocks),
        }
    }
}

#[async_trait]
impl FactsSource for StaticFacts {
    async fn multiaddr_facts(&self) -> Vec<MultiAddrFact> {
        self.addrs.lock().unwrap().clone()
    }

    async fn block_facts(&self) -> Vec<BlockFact> {
        self.blocks.lock().unwrap().clone()
    }
}

fn block_fact(service: &str, time: &str) -> BlockFact {
    BlockFact {
        service_name: service.to_string(),
        block_height: "1".to_string(),
        earliest_block_time: time.to_string(),
        namespace: "fleet".to_string(),
    }
}

#[test]
fn age_of_a_ten_day_old_block_is_ten_days() {
    let now = Utc.with_ymd_and_hms(2023, 1, 11, 0, 0, 0).unwrap();
    assert_eq!(days_difference_at("2023-01-01T00:00:00Z", now), 10);
}

#[test]
fn unparsable_age_is_the_sentinel() {
    let now = Utc.with_ymd_and_hms(2023, 1, 11, 0, 0, 0).unwrap();
    assert_eq!(days_difference_at("yesterday-ish", now), UNPARSABLE_AGE);
}

#[tokio::test]
async fn published_gauges_are_served_on_the_metrics_endpoint() {
    let metrics = Arc::new(MetricsHandle::new());
    let source = Arc::new(StaticFacts::new(
        vec![MultiAddrFact {
            service_name: "bridge-0".to_string(),
            node_name: "bridge-0".to_string(),
            multiaddr: "/dns/bridge-0/tcp/2121/p2p/12D3KooW".to_string(),
            namespace: "fleet".to_string(),
            value: 1.0,
        }],
        vec![
            block_fact("consensus-0", "not-a-timestamp"),
            block_fact("consensus-1", "2023-01-01T00:00:00Z"),
        ],
    ));
    let publisher = ObservabilityPublisher::register(metrics.registry(), source).unwrap();
    publisher.observe().await;

    let harness = Harness::start_with_metrics(topology_of(vec![]), metrics).await;
    let text = reqwest::get(harness.url("/metrics"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(text.contains("multiaddr{"));
    assert!(text.contains("multiaddress=\"/dns/bridge-0/tcp/2121/p2p/12D3KooW\""));
    // The malformed timestamp publishes the sentinel without suppressing
    // the healthy sample next to it.
    assert!(text.contains("days_running=\"-1\""));
    assert!(text.contains("service_name=\"consensus-1\""));
}

#[tokio::test]
async fn repeated_observation_is_idempotent_on_the_label_space() {
    let metrics = MetricsHandle::new();
    let source = Arc::new(StaticFacts::new(
        vec![],
        vec![block_fact("consensus-0", "2023-01-01T00:00:00Z")],
    ));
    let publisher = ObservabilityPublisher::register(metrics.registry(), source).unwrap();

    publisher.observe().await;
    publisher.observe().await;
    publisher.observe().await;

    let text = metrics.encode().unwrap();
    let samples = text
        .lines()
        .filter(|line| line.starts_with("block_height_1{"))
        .count();
    assert_eq!(samples, 1, "cycles must not accumulate duplicate samples");
}
