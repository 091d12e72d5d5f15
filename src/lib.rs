//! Taker light-mining bot library
//!
//! Logs wallets into the Taker platform, checks their mining cooldown and
//! starts a new session (API acknowledgement plus on-chain activation) when
//! it has elapsed.

pub mod api;
pub mod bot;
pub mod chain;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod wallet;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
