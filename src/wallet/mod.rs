//! Wallet management module
//!
//! - Wallet list loading (wallets.json)
//! - Text list conversion (`address:private_key` per line)

pub mod convert;
pub mod store;
pub mod types;

pub use convert::{convert_file, parse_wallet_lines};
pub use store::{load_wallets, save_wallets};
pub use types::Wallet;
