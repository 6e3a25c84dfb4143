//! Envelope contracts of the control API endpoints.
//!
//! Every endpoint answers 200 at the transport level; the logical status is
//! asserted inside the `{status, body, errors?}` envelope.

use serde_json::Value;

use super::{consensus_peer, da_peer, topology_of, Harness};

async fn get_json(url: &str) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn config_returns_the_declared_topology() {
    let harness = Harness::start(topology_of(vec![
        da_peer("da-bridge-0"),
        consensus_peer("consensus-0", true),
    ]))
    .await;

    let (status, body) = get_json(&harness.url("/config")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], 200);
    let peers = &body["body"]["peer_groups"][0]["peers"];
    assert_eq!(peers.as_array().unwrap().len(), 2);
    assert_eq!(peers[0]["node_name"], "da-bridge-0");
    assert_eq!(peers[0]["node_type"], "da");
}

#[tokio::test]
async fn list_returns_all_registry_entries() {
    let harness = Harness::start(topology_of(vec![da_peer("da-bridge-0")])).await;
    harness
        .registry
        .insert("da-bridge-0", "/dns/bridge-0/tcp/2121/p2p/12D3KooW");

    let (_, body) = get_json(&harness.url("/list")).await;
    assert_eq!(body["status"], 200);
    assert_eq!(
        body["body"]["da-bridge-0"],
        "/dns/bridge-0/tcp/2121/p2p/12D3KooW"
    );
}

#[tokio::test]
async fn unknown_node_lookup_is_a_404_envelope() {
    let harness = Harness::start(topology_of(vec![da_peer("da-bridge-0")])).await;

    let (status, body) = get_json(&harness.url("/nodes/ghost-node")).await;
    // Transport stays 200; the logical status travels in the envelope.
    assert_eq!(status, 200);
    assert_eq!(body["status"], 404);
    assert_eq!(body["errors"], "error: Pod doesn't exists in the config");
}

#[tokio::test]
async fn known_node_without_registry_entry_is_a_404_envelope() {
    let harness = Harness::start(topology_of(vec![da_peer("da-bridge-0")])).await;

    let (_, body) = get_json(&harness.url("/nodes/da-bridge-0")).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["errors"], "[ERROR] Node [da-bridge-0] not found");
}

#[tokio::test]
async fn configure_unknown_node_is_a_404_envelope() {
    let harness = Harness::start(topology_of(vec![da_peer("da-bridge-0")])).await;

    let response = reqwest::Client::new()
        .post(harness.url("/configure"))
        .header("content-type", "application/json")
        .body(r#"{"pod_name": "unknown-node"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 404);
    assert_eq!(body["errors"], "error: Pod doesn't exists in the config");
}

#[tokio::test]
async fn malformed_configure_body_is_a_400_envelope() {
    let harness = Harness::start(topology_of(vec![da_peer("da-bridge-0")])).await;

    let response = reqwest::Client::new()
        .post(harness.url("/configure"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["errors"].as_str().is_some());
}

#[tokio::test]
async fn health_reports_ok() {
    let harness = Harness::start(topology_of(vec![])).await;
    let (status, body) = get_json(&harness.url("/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "lantern");
}

#[tokio::test]
async fn metrics_serves_prometheus_text() {
    let harness = Harness::start(topology_of(vec![])).await;
    let response = reqwest::get(harness.url("/metrics")).await.unwrap();
    assert_eq!(response.status(), 200);
    // Nothing registered yet: empty text body, not an error.
    assert_eq!(response.text().await.unwrap(), "");
}
