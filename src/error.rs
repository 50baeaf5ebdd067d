//! Error definitions shared across the crate.

use thiserror::Error;

/// Errors surfaced by session, gateway, and signing operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A gateway-dependent operation was attempted before `open`.
    #[error("account is not open")]
    AccountNotOpen,

    /// A gateway-dependent operation was attempted with no gateway URL set.
    #[error("network is not set")]
    NetworkNotSet,

    /// `open` was called with an empty address.
    #[error("invalid address format")]
    InvalidAddress,

    /// The signing key is not valid hex or not a valid curve scalar.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// HTTP or connection failure talking to the gateway.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx HTTP status.
    #[error("gateway returned status {status}: {body}")]
    Server { status: u16, body: String },

    /// HTTP succeeded but the envelope carried a failure result code.
    #[error("gateway rejected request: {0}")]
    Protocol(String),

    /// The gateway response body was not valid JSON for the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Malformed hex content (odd length or non-hex characters).
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Finality polling exceeded its deadline.
    #[error("timed out after {0}s waiting for transaction finality")]
    Timeout(u64),

    /// Finality polling was cancelled by the caller.
    #[error("finality polling cancelled")]
    Cancelled,
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
