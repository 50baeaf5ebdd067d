//! Gateway discovery: resolve a network name to its NAG base URL.

use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::gateway::client::GatewayClient;
use crate::gateway::types::DiscoveryResponse;

/// Resolve `network` (e.g. `devnet`, `testnet`, `mainnet`, or a custom name)
/// against the discovery endpoint.
///
/// A non-2xx status, a declared-failure body, or an empty/unparseable URL is
/// an error; the caller keeps its previous gateway URL in that case.
pub async fn resolve_nag(
    http: &GatewayClient,
    network_url: &str,
    network: &str,
) -> ClientResult<String> {
    if network.is_empty() {
        return Err(ClientError::Protocol(
            "network identifier cannot be empty".to_string(),
        ));
    }

    let request_url = format!("{network_url}{network}");
    let body: DiscoveryResponse = http.get(&request_url).await?;

    if body.status != "success" || body.url.is_empty() {
        let reason = if body.message.is_empty() {
            format!("discovery returned status '{}'", body.status)
        } else {
            body.message
        };
        return Err(ClientError::Protocol(reason));
    }

    Url::parse(&body.url).map_err(|e| {
        ClientError::Protocol(format!("discovery returned invalid URL '{}': {e}", body.url))
    })?;

    tracing::info!(network, url = %body.url, "resolved gateway");
    Ok(body.url)
}
