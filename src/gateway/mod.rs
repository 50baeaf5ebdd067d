//! Network Access Gateway (NAG) transport boundary.
//!
//! # Data Flow
//! ```text
//! Network name
//!     → discovery.rs (resolve name to gateway URL)
//!     → client.rs (JSON POST, envelope decoding, timeouts)
//!     → types.rs (wire shapes and the fixed endpoint set)
//! ```
//!
//! The rest of the crate never touches HTTP directly; everything goes
//! through [`GatewayClient`].

pub mod client;
pub mod discovery;
pub mod types;

pub use client::GatewayClient;
pub use types::{Endpoint, Envelope};
