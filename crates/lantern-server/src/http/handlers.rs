//! Control API handlers.
//!
//! Every endpoint answers 200 at the transport level; the logical status
//! travels in the `{status, body, errors?}` envelope.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use lantern_core::OrchestrationStatus;

use crate::state::AppState;

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    /// Logical status of the request.
    pub status: u16,
    /// Response payload.
    pub body: Value,
    /// Errors that occurred during the request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl Envelope {
    /// 200 with a payload.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            errors: None,
        }
    }

    /// 404 with a message.
    pub fn not_found(body: Value, message: impl Into<String>) -> Self {
        Self::error(404, body, message)
    }

    /// Arbitrary logical status with a message.
    pub fn error(status: u16, body: Value, message: impl Into<String>) -> Self {
        Self {
            status,
            body,
            errors: Some(Value::String(message.into())),
        }
    }
}

/// Body of a `POST /configure` request.
#[derive(Debug, Deserialize)]
pub struct ConfigureRequest {
    /// Node to configure.
    pub pod_name: String,
}

/// `GET /config` — the current topology as JSON.
pub async fn get_config(State(state): State<AppState>) -> Json<Envelope> {
    let body = serde_json::to_value(state.topology.as_ref()).unwrap_or_default();
    Json(Envelope::ok(body))
}

/// `GET /list` — every registry entry, bounded by the registry deadline.
pub async fn list(State(state): State<AppState>) -> Json<Envelope> {
    match state.registry.get_all().await {
        Ok(entries) => Json(Envelope::ok(json!(entries))),
        Err(err) => {
            error!(error = %err, "listing registry entries failed");
            Json(Envelope::error(500, Value::Null, err.to_string()))
        }
    }
}

/// `GET /nodes/{nodeName}` — a node's last known trusted-peer address.
pub async fn get_node(
    State(state): State<AppState>,
    Path(node_name): Path<String>,
) -> Json<Envelope> {
    if state.topology.find_peer(&node_name).is_none() {
        error!(node = %node_name, "pod doesn't exist in the config");
        return Json(Envelope::not_found(
            Value::String(String::new()),
            "error: Pod doesn't exists in the config",
        ));
    }

    match state.registry.get(&node_name).await {
        Ok(Some(address)) if !address.is_empty() => Json(Envelope::ok(Value::String(address))),
        Ok(_) => Json(Envelope::not_found(
            Value::String(String::new()),
            format!("[ERROR] Node [{node_name}] not found"),
        )),
        Err(err) => {
            error!(node = %node_name, error = %err, "registry read failed");
            Json(Envelope::error(500, Value::Null, err.to_string()))
        }
    }
}

/// `POST /configure` — validate a node and run the orchestrator for it.
pub async fn configure(State(state): State<AppState>, body: String) -> Json<Envelope> {
    let request: ConfigureRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "decoding the request body failed");
            return Json(Envelope::error(400, Value::Null, err.to_string()));
        }
    };

    let Some(peer) = state.topology.find_peer(&request.pod_name) else {
        error!(node = %request.pod_name, "pod doesn't exist in the config");
        return Json(Envelope::not_found(
            Value::String(request.pod_name),
            "error: Pod doesn't exists in the config",
        ));
    };

    info!(node = %peer.node_name, "pod to set up");
    let result = state.orchestrator.configure(peer, &state.topology).await;
    let envelope = match result.status {
        OrchestrationStatus::Ok => Envelope::ok(Value::String(result.node_name)),
        OrchestrationStatus::NotFound => {
            Envelope::not_found(Value::String(result.node_name), result.detail)
        }
        OrchestrationStatus::UnsupportedConfiguration | OrchestrationStatus::InternalError => {
            Envelope::error(500, Value::String(result.node_name), result.detail)
        }
    };
    Json(envelope)
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "lantern",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /metrics` — Prometheus text encoding of the constructed registry.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text),
        Err(err) => {
            error!(error = %err, "encoding metrics failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
