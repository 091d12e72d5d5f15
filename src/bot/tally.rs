//! Per-cycle counters

use std::fmt;

use super::processor::WalletOutcome;

/// Wallet counts for one pass over the wallet set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
}

impl RunTally {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Count one finished wallet
    pub fn record(&mut self, outcome: &WalletOutcome) {
        if outcome.is_processed() {
            self.processed += 1;
        } else {
            self.skipped += 1;
        }
    }

    /// Wallets not yet counted this cycle
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.processed + self.skipped)
    }
}

impl fmt::Display for RunTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} processed={} skipped={}",
            self.total, self.processed, self.skipped
        )
    }
}
