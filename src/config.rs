//! Client configuration and protocol constants.
//!
//! All network defaults live here as an explicit configuration struct passed
//! into session construction. Sessions never share mutable process state.

use serde::{Deserialize, Serialize};

/// Version string reported in every request envelope.
pub const LIB_VERSION: &str = "1.0.13";

/// Chain identifier of the default public network.
pub const DEFAULT_CHAIN: &str =
    "0x8a20baa40c45dc5055aeb26197c203e576ef389d9acb171bd62da11dc5ad72b2";

/// URL of the default public Network Access Gateway.
pub const DEFAULT_NAG: &str = "https://nag.circularlabs.io/NAG.php?cep=";

/// Base endpoint for resolving a network name to its gateway URL.
pub const NETWORK_URL: &str = "https://circularlabs.io/network/getNAG?network=";

/// Configuration for an account session.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Gateway discovery endpoint; the network name is appended verbatim.
    pub network_url: String,

    /// Gateway URL used before `set_network` resolves one. `None` means the
    /// session refuses gateway operations until a network is selected.
    pub nag_url: Option<String>,

    /// Chain identifier submitted with every transaction.
    pub chain: String,

    /// Seconds between finality polls.
    pub poll_interval_secs: u64,

    /// Request timeout applied to every gateway call.
    pub http_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network_url: NETWORK_URL.to_string(),
            nag_url: Some(DEFAULT_NAG.to_string()),
            chain: DEFAULT_CHAIN.to_string(),
            poll_interval_secs: 2,
            http_timeout_secs: 30,
        }
    }
}
