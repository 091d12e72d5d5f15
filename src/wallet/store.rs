//! Wallet store
//!
//! Loads the wallet list from wallets.json. The list is read once at startup
//! and never written back by the bot.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};

use super::types::Wallet;

/// Load wallets from a JSON array file
///
/// Fails if the file is missing, unparsable or holds no wallets.
pub fn load_wallets(path: &Path) -> Result<Vec<Wallet>> {
    if !path.exists() {
        return Err(Error::WalletFile(format!(
            "No wallets found: {} does not exist",
            path.display()
        )));
    }

    debug!("Loading wallets from: {:?}", path);

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::WalletFile(format!("Failed to read {}: {}", path.display(), e)))?;

    let wallets: Vec<Wallet> = serde_json::from_str(&content)
        .map_err(|e| Error::WalletFile(format!("Failed to parse {}: {}", path.display(), e)))?;

    if wallets.is_empty() {
        return Err(Error::WalletFile(format!(
            "No wallets found in {}",
            path.display()
        )));
    }

    info!("Loaded {} wallet entries", wallets.len());
    Ok(wallets)
}

/// Write wallets as a pretty-printed JSON array, creating parent directories
pub fn save_wallets(path: &Path, wallets: &[Wallet]) -> Result<()> {
    let json = serde_json::to_string_pretty(wallets)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, json)?;
    Ok(())
}
