//! Account session: lifecycle, nonce tracking, and certificate submission.

use std::time::Duration;

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::account::poller::FinalityPoller;
use crate::certificate::Certificate;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::gateway::client::GatewayClient;
use crate::gateway::types::{
    Endpoint, Envelope, NonceRequest, TransactionEnvelope, TransactionQuery,
    PAYLOAD_ACTION_CERTIFICATE, TX_TYPE_CERTIFICATE,
};
use crate::signer;
use crate::util::hex::{hex_fix, to_hex};
use crate::util::time::formatted_timestamp;

/// Derive the content-addressed transaction id.
///
/// The preimage is the raw concatenation of the hex-normalized chain, from
/// and to addresses, the hex payload, the decimal nonce, and the timestamp,
/// in that exact order. Changing the order breaks interoperability with
/// other client implementations.
pub fn derive_tx_id(
    chain: &str,
    from: &str,
    to: &str,
    payload_hex: &str,
    nonce: u64,
    timestamp: &str,
) -> String {
    let preimage = format!(
        "{}{}{}{}{}{}",
        hex_fix(chain),
        hex_fix(from),
        hex_fix(to),
        payload_hex,
        nonce,
        timestamp
    );
    to_hex(&Sha256::digest(preimage.as_bytes()))
}

/// A single account's session against the gateway.
///
/// Holds the address, chain, resolved gateway URL, and the next nonce.
/// Created empty; becomes usable for submission after [`open`] and a
/// resolved gateway URL.
///
/// [`open`]: AccountSession::open
#[derive(Debug, Clone)]
pub struct AccountSession {
    gateway: GatewayClient,
    config: ClientConfig,
    address: Option<String>,
    chain: String,
    nag_url: Option<String>,
    network_node: String,
    nonce: u64,
    latest_tx_id: Option<String>,
    poll_interval_secs: u64,
}

impl AccountSession {
    /// Create a session from explicit configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let gateway = GatewayClient::new(Duration::from_secs(config.http_timeout_secs))?;
        Ok(Self {
            gateway,
            address: None,
            chain: config.chain.clone(),
            nag_url: config.nag_url.clone(),
            network_node: String::new(),
            nonce: 0,
            latest_tx_id: None,
            poll_interval_secs: config.poll_interval_secs,
            config,
        })
    }

    /// Bind the session to an account address.
    ///
    /// Calling again replaces the previous address.
    pub fn open(&mut self, address: &str) -> ClientResult<()> {
        if address.is_empty() {
            return Err(ClientError::InvalidAddress);
        }
        self.address = Some(address.to_string());
        Ok(())
    }

    /// Resolve `network` through the discovery endpoint and adopt its
    /// gateway URL.
    ///
    /// On failure the previously configured gateway URL is kept.
    pub async fn set_network(&mut self, network: &str) -> ClientResult<String> {
        let nag_url =
            crate::gateway::discovery::resolve_nag(&self.gateway, &self.config.network_url, network)
                .await?;
        self.nag_url = Some(nag_url.clone());
        self.network_node = network.to_string();
        Ok(nag_url)
    }

    /// Override the chain id for subsequent submissions.
    pub fn set_chain(&mut self, chain: &str) {
        self.chain = chain.to_string();
    }

    /// Override the finality poll interval.
    pub fn set_poll_interval(&mut self, secs: u64) {
        self.poll_interval_secs = secs;
    }

    /// The bound address, if the session is open.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// The chain id submissions will target.
    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// The gateway URL in effect, if any.
    pub fn gateway_url(&self) -> Option<&str> {
        self.nag_url.as_deref()
    }

    /// Nonce that will be used for the next submission.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Id of the most recently submitted transaction.
    pub fn latest_tx_id(&self) -> Option<&str> {
        self.latest_tx_id.as_deref()
    }

    /// Refresh the nonce from the gateway.
    ///
    /// Sets the local nonce to the reported value plus one. Any transport,
    /// HTTP, or protocol failure leaves the nonce unchanged.
    pub async fn update_nonce(&mut self) -> ClientResult<()> {
        let address = self.require_address()?.to_string();
        let url = self.endpoint_url(Endpoint::WalletNonce)?;

        let request = NonceRequest {
            blockchain: hex_fix(&self.chain).to_string(),
            address: hex_fix(&address).to_string(),
            version: self.config_version(),
        };

        let envelope = self.gateway.post(&url, &request).await?;
        if !envelope.is_success() {
            return Err(ClientError::Protocol(envelope.failure_message()));
        }

        let reported = envelope
            .response
            .get("Nonce")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| {
                ClientError::Protocol("response missing numeric Nonce field".to_string())
            })?;

        self.nonce = reported + 1;
        tracing::debug!(nonce = self.nonce, "nonce refreshed");
        Ok(())
    }

    /// Sign and submit a certificate as a self-addressed transaction.
    ///
    /// On gateway-confirmed success, records the derived id as the latest
    /// transaction and advances the nonce by one. A rejected or failed
    /// submission leaves the nonce untouched so the session cannot drift
    /// out of sync with the chain.
    pub async fn submit_certificate(
        &mut self,
        certificate: &Certificate,
        private_key_hex: &str,
    ) -> ClientResult<String> {
        let address = self.require_address()?.to_string();
        let url = self.endpoint_url(Endpoint::AddTransaction)?;

        let cert_json = certificate.to_json()?;
        let payload_object = json!({
            "Action": PAYLOAD_ACTION_CERTIFICATE,
            "Data": to_hex(cert_json.as_bytes()),
        });
        let payload_hex = to_hex(payload_object.to_string().as_bytes());

        let timestamp = formatted_timestamp();
        let id = derive_tx_id(
            &self.chain,
            &address,
            &address,
            &payload_hex,
            self.nonce,
            &timestamp,
        );
        let signature = signer::sign(id.as_bytes(), private_key_hex)?;

        let transaction = TransactionEnvelope {
            id: id.clone(),
            from: hex_fix(&address).to_string(),
            to: hex_fix(&address).to_string(),
            timestamp,
            payload: payload_hex,
            nonce: self.nonce.to_string(),
            signature,
            blockchain: hex_fix(&self.chain).to_string(),
            tx_type: TX_TYPE_CERTIFICATE.to_string(),
            version: self.config_version(),
        };

        let envelope = self.gateway.post(&url, &transaction).await?;
        if !envelope.is_success() {
            return Err(ClientError::Protocol(envelope.failure_message()));
        }

        self.latest_tx_id = Some(id.clone());
        self.nonce += 1;
        tracing::info!(tx_id = %id, nonce = self.nonce, "certificate submitted");
        Ok(id)
    }

    /// Look up a transaction by id within `[start, end]`.
    ///
    /// `end == 0` asks the gateway to search `start` blocks back from the
    /// latest minted block. Returns the raw gateway envelope; a missing
    /// transaction is reported inside it, not as a transport error.
    pub async fn get_transaction_by_id(
        &self,
        tx_id: &str,
        start: u64,
        end: u64,
    ) -> ClientResult<Envelope> {
        let url = self.endpoint_url(Endpoint::TransactionById)?;
        let request = TransactionQuery {
            blockchain: hex_fix(&self.chain).to_string(),
            id: hex_fix(tx_id).to_string(),
            start: start.to_string(),
            end: end.to_string(),
            version: self.config_version(),
        };
        self.gateway.post(&url, &request).await
    }

    /// Look up a transaction inside one specific block.
    pub async fn get_transaction(&self, block: u64, tx_id: &str) -> ClientResult<Envelope> {
        self.get_transaction_by_id(tx_id, block, block).await
    }

    /// Build a poller for transactions submitted through this session.
    pub fn finality_poller(&self) -> ClientResult<FinalityPoller> {
        Ok(FinalityPoller::new(
            self.gateway.clone(),
            self.endpoint_url(Endpoint::TransactionById)?,
            hex_fix(&self.chain).to_string(),
            self.config_version(),
            Duration::from_secs(self.poll_interval_secs),
        ))
    }

    /// Block until `tx_id` reaches a terminal status or `timeout_secs`
    /// elapses. Convenience wrapper over [`FinalityPoller::wait`].
    pub async fn wait_for_outcome(
        &self,
        tx_id: &str,
        timeout_secs: u64,
    ) -> ClientResult<serde_json::Value> {
        self.finality_poller()?
            .wait(tx_id, Duration::from_secs(timeout_secs))
            .await
    }

    /// Reset the session to its just-constructed state.
    ///
    /// Clears the address and latest transaction id, zeroes the nonce, and
    /// restores the configured chain, gateway URL, and poll interval. Safe
    /// to call repeatedly.
    pub fn close(&mut self) {
        self.address = None;
        self.chain = self.config.chain.clone();
        self.nag_url = self.config.nag_url.clone();
        self.network_node.clear();
        self.nonce = 0;
        self.latest_tx_id = None;
        self.poll_interval_secs = self.config.poll_interval_secs;
    }

    fn require_address(&self) -> ClientResult<&str> {
        self.address.as_deref().ok_or(ClientError::AccountNotOpen)
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> ClientResult<String> {
        let nag_url = self.nag_url.as_deref().ok_or(ClientError::NetworkNotSet)?;
        Ok(format!("{nag_url}{}{}", endpoint.suffix(), self.network_node))
    }

    fn config_version(&self) -> String {
        crate::config::LIB_VERSION.to_string()
    }
}
