//! Wallet converter
//!
//! Turns a plain `address:private_key` list into the wallets.json format read
//! by the store.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

use super::store::save_wallets;
use super::types::Wallet;

/// Parse `address:private_key` lines
///
/// Lines are whitespace-stripped and blank lines ignored. Only the first `:`
/// splits, so the key keeps any later colons. Input order is preserved.
pub fn parse_wallet_lines(text: &str) -> Vec<Wallet> {
    let mut wallets = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((address, private_key)) => wallets.push(Wallet::new(address, private_key)),
            None => warn!("Line {} has no ':' separator, skipped", index + 1),
        }
    }

    wallets
}

/// Convert a wallet text file into a wallets.json file
///
/// Returns the number of wallets written.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| Error::WalletFile(format!("Failed to read {}: {}", input.display(), e)))?;

    let wallets = parse_wallet_lines(&text);
    save_wallets(output, &wallets)?;

    info!(
        success = true,
        "Created {} with {} wallets in JSON format",
        output.display(),
        wallets.len()
    );

    Ok(wallets.len())
}
