//! Shared mock gateway and discovery servers for integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};

/// Scripted behavior and request capture for one mock gateway.
#[derive(Debug)]
pub struct GatewayState {
    /// Nonce reported by the wallet-nonce endpoint.
    pub wallet_nonce: u64,
    /// HTTP status for wallet-nonce responses.
    pub nonce_http_status: u16,
    /// Full envelope override for wallet-nonce responses.
    pub nonce_response: Option<Value>,
    /// Raw body override for wallet-nonce (malformed-JSON scenarios).
    pub nonce_raw_body: Option<String>,
    /// HTTP status for add-transaction responses.
    pub submit_http_status: u16,
    /// Envelope returned by add-transaction; defaults to success.
    pub submit_response: Option<Value>,
    /// Envelopes returned by transaction-by-id queries in order; the last
    /// one repeats once the queue drains.
    pub status_sequence: VecDeque<Value>,
    /// Fail this many transaction-by-id queries with HTTP 500 first.
    pub query_http_failures: u32,
    /// Every `(endpoint, body)` pair received, in arrival order.
    pub requests: Vec<(String, Value)>,
}

impl Default for GatewayState {
    fn default() -> Self {
        Self {
            wallet_nonce: 0,
            nonce_http_status: 200,
            nonce_response: None,
            nonce_raw_body: None,
            submit_http_status: 200,
            submit_response: None,
            status_sequence: VecDeque::new(),
            query_http_failures: 0,
            requests: Vec::new(),
        }
    }
}

impl GatewayState {
    /// Bodies received for a given endpoint prefix.
    #[allow(dead_code)]
    pub fn requests_for(&self, endpoint_prefix: &str) -> Vec<Value> {
        self.requests
            .iter()
            .filter(|(cep, _)| cep.starts_with(endpoint_prefix))
            .map(|(_, body)| body.clone())
            .collect()
    }
}

type SharedState = Arc<Mutex<GatewayState>>;

/// A pending transaction status envelope.
#[allow(dead_code)]
pub fn pending_envelope() -> Value {
    json!({"Result": 200, "Response": {"Status": "Pending"}})
}

/// A finalized transaction status envelope.
#[allow(dead_code)]
pub fn executed_envelope() -> Value {
    json!({"Result": 200, "Response": {"Status": "Executed", "BlockID": "9"}})
}

/// The gateway's not-found sentinel.
#[allow(dead_code)]
pub fn not_found_envelope() -> Value {
    json!({"Result": 200, "Response": "Transaction Not Found"})
}

async fn nag_handler(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> (StatusCode, String) {
    let cep = params.get("cep").cloned().unwrap_or_default();
    let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    let mut state = state.lock().unwrap();
    state.requests.push((cep.clone(), parsed));

    if cep.starts_with("Circular_GetWalletNonce_") {
        if state.nonce_http_status != 200 {
            return (
                StatusCode::from_u16(state.nonce_http_status).unwrap(),
                "nonce endpoint unavailable".to_string(),
            );
        }
        if let Some(raw) = &state.nonce_raw_body {
            return (StatusCode::OK, raw.clone());
        }
        let envelope = state
            .nonce_response
            .clone()
            .unwrap_or_else(|| json!({"Result": 200, "Response": {"Nonce": state.wallet_nonce}}));
        return (StatusCode::OK, envelope.to_string());
    }

    if cep.starts_with("Circular_AddTransaction_") {
        if state.submit_http_status != 200 {
            return (
                StatusCode::from_u16(state.submit_http_status).unwrap(),
                "gateway exploded".to_string(),
            );
        }
        let envelope = state
            .submit_response
            .clone()
            .unwrap_or_else(|| json!({"Result": 200, "Response": "Transaction Added"}));
        return (StatusCode::OK, envelope.to_string());
    }

    if cep.starts_with("Circular_GetTransactionbyID_") {
        if state.query_http_failures > 0 {
            state.query_http_failures -= 1;
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "query endpoint unavailable".to_string(),
            );
        }
        let envelope = if state.status_sequence.len() > 1 {
            state.status_sequence.pop_front().unwrap()
        } else {
            state
                .status_sequence
                .front()
                .cloned()
                .unwrap_or_else(pending_envelope)
        };
        return (StatusCode::OK, envelope.to_string());
    }

    (StatusCode::NOT_FOUND, format!("unknown endpoint: {cep}"))
}

/// Spawn a mock gateway; returns a base URL ready for endpoint suffixes
/// (ends in `?cep=`).
pub async fn spawn_gateway(state: SharedState) -> String {
    let app = Router::new()
        .route("/nag", post(nag_handler))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/nag?cep=")
}

async fn discovery_handler(State(body): State<Arc<(StatusCode, String)>>) -> (StatusCode, String) {
    (body.0, body.1.clone())
}

/// Spawn a discovery server answering every request with `response`;
/// returns a base URL ready for a network name (ends in `?network=`).
#[allow(dead_code)]
pub async fn spawn_discovery(response: Value) -> String {
    spawn_discovery_with_status(StatusCode::OK, response.to_string()).await
}

/// Discovery server with full control over status and body.
#[allow(dead_code)]
pub async fn spawn_discovery_with_status(status: StatusCode, body: String) -> String {
    let app = Router::new()
        .route("/getNAG", get(discovery_handler))
        .with_state(Arc::new((status, body)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/getNAG?network=")
}
