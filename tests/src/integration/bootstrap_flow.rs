//! End-to-end bootstrap flow: configure a DA node, observe the dispatched
//! command sequence, then read its address back once the registry holds it.

use serde_json::Value;

use lantern_core::BootstrapCommand;

use super::{consensus_peer, da_peer, topology_of, Harness};

const BRIDGE_ADDR: &str = "/dns/bridge-0/tcp/2121/p2p/12D3KooWBridge";

async fn configure(harness: &Harness, name: &str) -> Value {
    reqwest::Client::new()
        .post(harness.url("/configure"))
        .header("content-type", "application/json")
        .body(format!(r#"{{"pod_name": "{name}"}}"#))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn da_node_bootstrap_runs_create_then_bulk_append() {
    let harness = Harness::start(topology_of(vec![da_peer("bridge-0")])).await;
    harness.executor.respond_with(format!("{BRIDGE_ADDR}\n"));

    let body = configure(&harness, "bridge-0").await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["body"], "bridge-0");

    let calls = harness.executor.calls();
    assert_eq!(harness.executor.command_names(), vec!["create", "bulk-append"]);
    // Both commands target the defaulted DA container of the node.
    assert!(calls.iter().all(|(target, _)| target.node_name == "bridge-0"));
    assert!(calls.iter().all(|(target, _)| target.container == "da"));
    match &calls[1].1 {
        BootstrapCommand::BulkAppend(cmd) => assert_eq!(cmd.address, BRIDGE_ADDR),
        other => panic!("expected bulk-append, got {}", other.name()),
    }

    // Once the registry reflects the bootstrapped address, the lookup
    // endpoint serves it.
    harness.registry.insert("bridge-0", BRIDGE_ADDR);
    let body: Value = reqwest::get(harness.url("/nodes/bridge-0"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], 200);
    assert_eq!(body["body"], BRIDGE_ADDR);
}

#[tokio::test]
async fn failed_create_surfaces_as_a_500_envelope() {
    let harness = Harness::start(topology_of(vec![da_peer("bridge-0")])).await;
    harness
        .executor
        .fail_with("bridge-0/da", "container not ready");

    let body = configure(&harness, "bridge-0").await;
    assert_eq!(body["status"], 500);
    assert!(body["errors"]
        .as_str()
        .unwrap()
        .contains("container not ready"));
    // The failed create must not be followed by a bulk append.
    assert_eq!(harness.executor.command_names(), vec!["create"]);
}

#[tokio::test]
async fn env_var_peer_takes_the_wiring_path() {
    let harness = Harness::start(topology_of(vec![
        consensus_peer("consensus-0", true),
        da_peer("bridge-0"),
    ]))
    .await;

    let body = configure(&harness, "consensus-0").await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["body"], "consensus-0");
    assert_eq!(harness.wiring.wired(), vec!["consensus-0".to_string()]);
    assert!(harness.executor.calls().is_empty());
}

#[tokio::test]
async fn consensus_without_env_var_is_rejected_explicitly() {
    let harness = Harness::start(topology_of(vec![consensus_peer("consensus-0", false)])).await;

    let body = configure(&harness, "consensus-0").await;
    assert_eq!(body["status"], 500);
    assert!(body["errors"]
        .as_str()
        .unwrap()
        .contains("no remote configuration path"));
    assert!(harness.executor.calls().is_empty());
    assert!(harness.wiring.wired().is_empty());
}
