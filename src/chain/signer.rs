//! Key handling and personal-message signing

use alloy::hex;
use alloy::primitives::{Address, Signature};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::error::{Error, Result};

/// Parse a hex private key, with or without 0x prefix
pub fn parse_private_key(private_key: &str) -> Result<PrivateKeySigner> {
    private_key
        .trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| Error::InvalidKey(e.to_string()))
}

/// Account address controlled by a private key
pub fn address_of(private_key: &str) -> Result<Address> {
    Ok(parse_private_key(private_key)?.address())
}

/// EIP-191 signature over `message`
pub fn sign_raw(message: &str, private_key: &str) -> Result<Signature> {
    let signer = parse_private_key(private_key)?;
    signer
        .sign_message_sync(message.as_bytes())
        .map_err(|e| Error::Signing(e.to_string()))
}

/// EIP-191 signature over `message` as 0x-prefixed hex (r || s || v)
pub fn sign_message(message: &str, private_key: &str) -> Result<String> {
    let signature = sign_raw(message, private_key)?;
    Ok(hex::encode_prefixed(signature.as_bytes()))
}

/// Case-insensitive address comparison, tolerant of a missing 0x prefix
pub fn same_address(a: &str, b: &str) -> bool {
    let strip = |s: &str| {
        let s = s.trim();
        s.strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s)
            .to_ascii_lowercase()
    };
    strip(a) == strip(b)
}
