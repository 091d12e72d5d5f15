//! Bot module - per-wallet processing and the hourly loop
//!
//! ```text
//! Scheduler → WalletProcessor → {signer, TakerApi, Activator}
//! ```

pub mod processor;
pub mod scheduler;
pub mod tally;

pub use processor::{SkipReason, WalletOutcome, WalletProcessor};
pub use scheduler::Scheduler;
pub use tally::RunTally;
