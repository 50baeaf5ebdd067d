//! Wire shapes for gateway requests and responses.

use serde::{Deserialize, Serialize};

/// The fixed set of remote procedures the gateway exposes to this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Query the current nonce of a wallet.
    WalletNonce,
    /// Submit a signed transaction.
    AddTransaction,
    /// Look up a transaction by id within a block range.
    TransactionById,
}

impl Endpoint {
    /// Endpoint suffix appended to the gateway base URL, before the
    /// network-node identifier.
    pub fn suffix(self) -> &'static str {
        match self {
            Endpoint::WalletNonce => "Circular_GetWalletNonce_",
            Endpoint::AddTransaction => "Circular_AddTransaction_",
            Endpoint::TransactionById => "Circular_GetTransactionbyID_",
        }
    }
}

/// Response envelope every gateway RPC wraps its payload in.
///
/// `result == 200` signals success; otherwise `response` carries the failure
/// reason as a string or nested object.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Result")]
    pub result: i64,
    #[serde(rename = "Response", default)]
    pub response: serde_json::Value,
}

impl Envelope {
    /// Whether the gateway declared the call successful.
    pub fn is_success(&self) -> bool {
        self.result == 200
    }

    /// Best-effort extraction of the failure reason for error reporting.
    pub fn failure_message(&self) -> String {
        match &self.response {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => format!("result code {}", self.result),
            other => other.to_string(),
        }
    }
}

/// Body of the gateway-discovery response.
#[derive(Debug, Deserialize)]
pub struct DiscoveryResponse {
    pub status: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub message: String,
}

/// Request body for the wallet-nonce query.
#[derive(Debug, Serialize)]
pub struct NonceRequest {
    #[serde(rename = "Blockchain")]
    pub blockchain: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Version")]
    pub version: String,
}

/// Request body for the transaction-by-id query.
///
/// `start`/`end` are decimal block numbers as strings; `end == "0"` asks the
/// gateway to search `start` blocks back from the latest minted block.
#[derive(Debug, Serialize)]
pub struct TransactionQuery {
    #[serde(rename = "Blockchain")]
    pub blockchain: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Start")]
    pub start: String,
    #[serde(rename = "End")]
    pub end: String,
    #[serde(rename = "Version")]
    pub version: String,
}

/// A fully formed, signed certificate transaction as posted to the gateway.
///
/// `id` is derived from the transaction content, never chosen by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionEnvelope {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Payload")]
    pub payload: String,
    #[serde(rename = "Nonce")]
    pub nonce: String,
    #[serde(rename = "Signature")]
    pub signature: String,
    #[serde(rename = "Blockchain")]
    pub blockchain: String,
    #[serde(rename = "Type")]
    pub tx_type: String,
    #[serde(rename = "Version")]
    pub version: String,
}

/// Transaction type tag for certificate submissions.
pub const TX_TYPE_CERTIFICATE: &str = "C_TYPE_CERTIFICATE";

/// Action tag inside the certificate payload object.
pub const PAYLOAD_ACTION_CERTIFICATE: &str = "CP_CERTIFICATE";
