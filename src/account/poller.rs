//! Finality polling for submitted transactions.
//!
//! # Responsibilities
//! - Query the gateway on a fixed interval until the transaction leaves
//!   "Pending" (or "not found") state
//! - Enforce the overall deadline with an external timeout, never by
//!   accumulating sleeps, so slow queries cannot inflate the total wait
//! - Treat transport and decode failures as transient: log and retry,
//!   bounded only by the deadline
//! - Abort promptly on caller cancellation, distinct from timeout

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval_at, timeout, Instant};

use crate::error::{ClientError, ClientResult};
use crate::gateway::client::GatewayClient;
use crate::gateway::types::{Envelope, TransactionQuery};

/// Status the gateway reports while a transaction awaits finality.
const STATUS_PENDING: &str = "Pending";

/// Sentinel the gateway reports for transactions it has not seen yet.
const STATUS_NOT_FOUND: &str = "Transaction Not Found";

/// Recent-blocks window searched on every poll.
const POLL_BLOCK_RANGE: (u64, u64) = (0, 10);

/// Handle for cancelling an in-flight finality poll.
///
/// Clonable; any clone can cancel. Dropping every handle does not cancel the
/// poll, it only removes the ability to.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: broadcast::Sender<()>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Signal every poll listening on this token to stop.
    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Polls the gateway until a submitted transaction reaches a terminal
/// status, the deadline passes, or the caller cancels.
#[derive(Debug, Clone)]
pub struct FinalityPoller {
    gateway: GatewayClient,
    query_url: String,
    chain: String,
    version: String,
    interval: Duration,
}

impl FinalityPoller {
    /// Build a poller against a fully formed transaction-query URL.
    pub fn new(
        gateway: GatewayClient,
        query_url: String,
        chain: String,
        version: String,
        interval: Duration,
    ) -> Self {
        Self {
            gateway,
            query_url,
            chain,
            version,
            interval,
        }
    }

    /// Poll until `tx_id` is final or `deadline` elapses.
    ///
    /// Returns the gateway's status payload on confirmation. The first
    /// query fires after one full interval, not immediately.
    pub async fn wait(&self, tx_id: &str, deadline: Duration) -> ClientResult<serde_json::Value> {
        let token = CancelToken::new();
        self.wait_with_cancel(tx_id, deadline, &token).await
    }

    /// [`wait`](Self::wait), abortable through `cancel`.
    ///
    /// Cancellation yields [`ClientError::Cancelled`]; a missed deadline
    /// yields [`ClientError::Timeout`]. The two are never conflated.
    pub async fn wait_with_cancel(
        &self,
        tx_id: &str,
        deadline: Duration,
        cancel: &CancelToken,
    ) -> ClientResult<serde_json::Value> {
        let mut cancel_rx = cancel.subscribe();

        let outcome = timeout(deadline, async {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);

            loop {
                tokio::select! {
                    _ = cancelled(&mut cancel_rx) => return Err(ClientError::Cancelled),
                    _ = ticker.tick() => {}
                }

                let envelope = match self.query(tx_id).await {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        tracing::warn!(tx_id, error = %e, "finality query failed, retrying");
                        continue;
                    }
                };

                if !envelope.is_success() {
                    tracing::debug!(tx_id, result = envelope.result, "transaction not yet visible");
                    continue;
                }

                let status = reported_status(&envelope).map(str::to_owned);
                match status.as_deref() {
                    Some(status) if status != STATUS_PENDING && status != STATUS_NOT_FOUND => {
                        tracing::info!(tx_id, status, "transaction finalized");
                        return Ok(envelope.response);
                    }
                    status => {
                        tracing::debug!(tx_id, status = status.unwrap_or("unknown"), "still polling");
                    }
                }
            }
        })
        .await;

        match outcome {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(deadline.as_secs())),
        }
    }

    async fn query(&self, tx_id: &str) -> ClientResult<Envelope> {
        let (start, end) = POLL_BLOCK_RANGE;
        let request = TransactionQuery {
            blockchain: self.chain.clone(),
            id: crate::util::hex::hex_fix(tx_id).to_string(),
            start: start.to_string(),
            end: end.to_string(),
            version: self.version.clone(),
        };
        self.gateway.post(&self.query_url, &request).await
    }
}

/// Status string reported for the transaction, if the gateway included one.
///
/// A plain-string `Response` (the not-found sentinel) reports no status.
fn reported_status(envelope: &Envelope) -> Option<&str> {
    match &envelope.response {
        serde_json::Value::String(s) => {
            if s == STATUS_NOT_FOUND {
                None
            } else {
                Some(s.as_str())
            }
        }
        object => object.get("Status").and_then(serde_json::Value::as_str),
    }
}

/// Resolve only on an actual cancel signal; a dropped sender pends forever
/// instead of spinning on channel-closed errors.
async fn cancelled(rx: &mut broadcast::Receiver<()>) {
    loop {
        match rx.recv().await {
            Ok(()) => return,
            Err(broadcast::error::RecvError::Lagged(_)) => return,
            Err(broadcast::error::RecvError::Closed) => std::future::pending::<()>().await,
        }
    }
}
