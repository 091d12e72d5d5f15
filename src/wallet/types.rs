//! Core wallet types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wallet entry from wallets.json
///
/// The field names are shared by the converter output and the store reader.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Chain address, checksummed or raw hex
    pub address: String,

    /// Hex private key, with or without 0x prefix
    pub private_key: String,
}

impl Wallet {
    pub fn new(address: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            private_key: private_key.into(),
        }
    }
}

// Keys must never reach the logs, even through {:?}
impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("private_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_private_key() {
        let wallet = Wallet::new("0xAAA", "0xdeadbeefcafe");
        let rendered = format!("{:?}", wallet);
        assert!(rendered.contains("0xAAA"));
        assert!(!rendered.contains("deadbeef"));
    }

    #[test]
    fn test_json_field_names() {
        let wallet = Wallet::new("0xAAA", "0xkey1");
        let json = serde_json::to_string(&wallet).unwrap();
        assert_eq!(json, r#"{"address":"0xAAA","private_key":"0xkey1"}"#);
    }
}
