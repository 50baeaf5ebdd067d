//! Certificate data model.
//!
//! A certificate is an opaque payload anchored to an account's transaction
//! history through provenance pointers. Pure data; submission lives in
//! [`crate::account::session`].

use serde::{Deserialize, Serialize};

use crate::config::LIB_VERSION;
use crate::error::ClientResult;
use crate::util::hex::{from_hex, to_hex};

/// Application-data envelope submitted to the chain.
///
/// `data` is held hex-encoded, the form it travels in on the wire. Empty
/// provenance pointers mean "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Hex-encoded payload bytes.
    pub data: String,
    /// Id of the previous transaction in this account's stream.
    #[serde(rename = "previousTxID")]
    pub previous_tx_id: String,
    /// Block that holds the previous transaction.
    #[serde(rename = "previousBlock")]
    pub previous_block: String,
    /// Client schema version.
    pub version: String,
}

impl Certificate {
    /// An empty certificate stamped with the current library version.
    pub fn new() -> Self {
        Self {
            data: String::new(),
            previous_tx_id: String::new(),
            previous_block: String::new(),
            version: LIB_VERSION.to_string(),
        }
    }

    /// Store `data` as the certificate payload (hex-encoded internally).
    pub fn set_data(&mut self, data: &[u8]) {
        self.data = to_hex(data);
    }

    /// Decode the payload back into bytes.
    ///
    /// Fails on odd-length or non-hex content rather than returning a
    /// truncated result.
    pub fn data(&self) -> ClientResult<Vec<u8>> {
        from_hex(&self.data)
    }

    /// Link this certificate to the previous transaction in the stream.
    pub fn set_previous_tx_id(&mut self, tx_id: &str) {
        self.previous_tx_id = tx_id.to_string();
    }

    /// Record the block that holds the previous transaction.
    pub fn set_previous_block(&mut self, block: &str) {
        self.previous_block = block.to_string();
    }

    /// Canonical JSON wire form.
    pub fn to_json(&self) -> ClientResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Byte length of the JSON wire form.
    ///
    /// Counts UTF-8 bytes, not characters, so multi-byte content is sized
    /// correctly.
    pub fn size(&self) -> ClientResult<usize> {
        Ok(self.to_json()?.len())
    }
}

impl Default for Certificate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_data_round_trip() {
        let cases: &[&[u8]] = &[
            b"",
            b"test data",
            "héllo wörld \u{1F600}".as_bytes(),
            &[0x00, 0xff, 0x00],
        ];
        for case in cases {
            let mut cert = Certificate::new();
            cert.set_data(case);
            assert_eq!(cert.data().unwrap(), *case);
        }
    }

    #[test]
    fn test_data_rejects_bad_hex() {
        let mut cert = Certificate::new();
        cert.data = "123".to_string();
        assert!(matches!(cert.data().unwrap_err(), ClientError::Hex(_)));

        cert.data = "zzzz".to_string();
        assert!(cert.data().is_err());
    }

    #[test]
    fn test_json_wire_form() {
        let mut cert = Certificate::new();
        cert.set_data(b"hi");
        cert.set_previous_tx_id("deadbeef");
        cert.set_previous_block("42");

        let json: serde_json::Value = serde_json::from_str(&cert.to_json().unwrap()).unwrap();
        assert_eq!(json["data"], "6869");
        assert_eq!(json["previousTxID"], "deadbeef");
        assert_eq!(json["previousBlock"], "42");
        assert_eq!(json["version"], LIB_VERSION);
    }

    #[test]
    fn test_size_counts_bytes() {
        let mut cert = Certificate::new();
        cert.set_data("é".as_bytes());
        let expected = cert.to_json().unwrap().len();
        assert_eq!(cert.size().unwrap(), expected);
    }

    #[test]
    fn test_new_is_empty() {
        let cert = Certificate::new();
        assert!(cert.data.is_empty());
        assert!(cert.previous_tx_id.is_empty());
        assert!(cert.previous_block.is_empty());
        assert_eq!(cert.version, LIB_VERSION);
        assert_eq!(cert.data().unwrap(), Vec::<u8>::new());
    }
}
