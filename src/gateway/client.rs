//! HTTP transport to the gateway.
//!
//! # Responsibilities
//! - JSON POST to gateway endpoints, decoding the `{Result, Response}` envelope
//! - JSON GET for the discovery endpoint
//! - Enforce a request timeout on every call
//!
//! Non-2xx statuses surface as [`ClientError::Server`] with the body
//! captured; malformed JSON surfaces as [`ClientError::Decode`]. The client
//! never retries — callers own their retry policy.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::gateway::types::Envelope;

/// Thin wrapper around a configured HTTP handle.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
}

impl GatewayClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// POST `body` as JSON and decode the gateway envelope.
    pub async fn post(&self, url: &str, body: &impl Serialize) -> ClientResult<Envelope> {
        tracing::debug!(url, "gateway request");
        let response = self.http.post(url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        tracing::debug!(url, "gateway request");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
