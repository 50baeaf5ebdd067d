//! Submit one certificate and wait for finality.
//!
//! The signing key is read from the `CIRCULAR_PRIVATE_KEY` environment
//! variable, never from the command line.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circular_client::{AccountSession, Certificate, ClientConfig};

/// Environment variable holding the hex-encoded signing key.
const PRIVATE_KEY_ENV_VAR: &str = "CIRCULAR_PRIVATE_KEY";

#[derive(Debug, Parser)]
#[command(name = "certify", about = "Submit a certificate to the Circular network")]
struct Args {
    /// Account address to submit from.
    #[arg(long)]
    address: String,

    /// Network to resolve a gateway for (devnet, testnet, mainnet, ...).
    #[arg(long, default_value = "testnet")]
    network: String,

    /// Chain id override; defaults to the public chain.
    #[arg(long)]
    chain: Option<String>,

    /// Certificate payload.
    #[arg(long)]
    data: String,

    /// Id of the previous transaction in this account's stream.
    #[arg(long, default_value = "")]
    previous_tx_id: String,

    /// Seconds to wait for finality before giving up.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circular_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
        .map_err(|_| format!("environment variable {PRIVATE_KEY_ENV_VAR} not set"))?;

    let mut session = AccountSession::new(ClientConfig::default())?;
    session.open(&args.address)?;
    if let Some(chain) = &args.chain {
        session.set_chain(chain);
    }

    let nag_url = session.set_network(&args.network).await?;
    tracing::info!(network = %args.network, gateway = %nag_url, "network selected");

    session.update_nonce().await?;
    tracing::info!(nonce = session.nonce(), "nonce refreshed");

    let mut certificate = Certificate::new();
    certificate.set_data(args.data.as_bytes());
    if !args.previous_tx_id.is_empty() {
        certificate.set_previous_tx_id(&args.previous_tx_id);
    }

    let tx_id = session.submit_certificate(&certificate, &private_key).await?;
    println!("submitted transaction {tx_id}");

    let outcome = session.wait_for_outcome(&tx_id, args.timeout).await?;
    println!("finalized: {outcome}");

    Ok(())
}
