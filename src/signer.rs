//! Deterministic transaction signing.
//!
//! # Responsibilities
//! - Parse hex private keys into secp256k1 scalars
//! - SHA-256 the message, ECDSA-sign, serialize as DER hex
//!
//! # Security Constraints
//! - Key material is never logged
//! - Signatures use RFC 6979 nonce derivation: signing the same bytes with
//!   the same key always yields the same output, so transaction ids can
//!   serve as idempotency and audit keys downstream

use k256::ecdsa::signature::Signer as _;
use k256::ecdsa::{Signature, SigningKey};

use crate::error::{ClientError, ClientResult};
use crate::util::hex::{hex_fix, to_hex};

/// Sign `message` with a hex-encoded secp256k1 private key.
///
/// The message is hashed with SHA-256 before signing; the signature is
/// DER-serialized and hex-encoded.
pub fn sign(message: &[u8], private_key_hex: &str) -> ClientResult<String> {
    let key_bytes = hex::decode(hex_fix(private_key_hex))
        .map_err(|e| ClientError::InvalidKey(format!("not a hex string: {e}")))?;

    let signing_key = SigningKey::from_slice(&key_bytes)
        .map_err(|e| ClientError::InvalidKey(format!("not a valid curve scalar: {e}")))?;

    let signature: Signature = signing_key.sign(message);
    Ok(to_hex(signature.to_der().as_bytes()))
}
