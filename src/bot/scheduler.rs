//! Hourly scheduler loop
//!
//! RUNNING: every wallet is processed once, strictly in order.
//! SLEEPING: a fixed pause before the next pass.
//! The wallet list is the one loaded at startup; edits to wallets.json need a
//! restart.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::wallet::Wallet;

use super::processor::WalletProcessor;
use super::tally::RunTally;

pub struct Scheduler {
    processor: WalletProcessor,
    wallets: Vec<Wallet>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(processor: WalletProcessor, wallets: Vec<Wallet>, interval: Duration) -> Self {
        Self {
            processor,
            wallets,
            interval,
        }
    }

    /// One pass over all wallets
    pub async fn run_cycle(&self) -> RunTally {
        warn!("=== Server might be slow - Please be patient ===");
        info!("Processing {} wallets", self.wallets.len());

        let mut tally = RunTally::new(self.wallets.len());

        for (index, wallet) in self.wallets.iter().enumerate() {
            info!(
                "[{}/{}] Processing wallet {}",
                index + 1,
                tally.total,
                wallet.address
            );

            let outcome = self.processor.process(wallet).await;
            tally.record(&outcome);
            debug!("{} wallet(s) left this cycle", tally.remaining());
        }

        info!("Cycle finished: {}", tally);
        tally
    }

    /// Alternate cycles and sleeps until Ctrl-C
    pub async fn run(&self) {
        loop {
            tokio::select! {
                _ = self.run_cycle() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    return;
                }
            }

            info!("Delay for {}", describe_interval(self.interval));

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    return;
                }
            }
        }
    }
}

fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        let hours = secs / 3600;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        format!("{} seconds", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::{MINING_TIME, START_MINING};
    use crate::api::transport::mock::ScriptedTransport;
    use crate::bot::processor::tests::{processor, script_login, RecordingActivator, ADDRESS, KEY};
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cycle_tallies_each_wallet_once() {
        let transport = Arc::new(ScriptedTransport::new());
        let activator = Arc::new(RecordingActivator::default());
        let now = Utc::now().timestamp();

        // Wallet 1: mined
        script_login(&transport, Some("taker_fan"));
        transport.push_ok(MINING_TIME, json!({"data": {"lastMiningTime": now - 90_000}}));
        transport.push_ok(START_MINING, json!({"data": true}));
        // Wallet 2: cooldown running
        script_login(&transport, Some("taker_fan"));
        transport.push_ok(MINING_TIME, json!({"data": {"lastMiningTime": now - 1_000}}));
        // Wallet 3: nonce endpoint unreachable

        let wallets = vec![
            Wallet::new(ADDRESS, KEY),
            Wallet::new(ADDRESS, KEY),
            Wallet::new("0xCCC", "0xkey3"),
        ];
        let scheduler = Scheduler::new(
            processor(&transport, &activator),
            wallets,
            Duration::from_secs(3600),
        );

        let tally = scheduler.run_cycle().await;

        assert_eq!(
            tally,
            RunTally {
                total: 3,
                processed: 1,
                skipped: 2
            }
        );
        assert_eq!(activator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repeated_cycles_before_cooldown_never_activate() {
        let transport = Arc::new(ScriptedTransport::new());
        let activator = Arc::new(RecordingActivator::default());
        let last = Utc::now().timestamp() - 1_000;

        for _ in 0..3 {
            script_login(&transport, Some("taker_fan"));
            transport.push_ok(MINING_TIME, json!({"data": {"lastMiningTime": last}}));
        }

        let scheduler = Scheduler::new(
            processor(&transport, &activator),
            vec![Wallet::new(ADDRESS, KEY)],
            Duration::from_secs(3600),
        );

        for _ in 0..3 {
            let tally = scheduler.run_cycle().await;
            assert_eq!(tally.skipped, 1);
        }

        assert_eq!(transport.calls_to(START_MINING), 0);
        assert_eq!(activator.call_count(), 0);
    }

    #[test]
    fn test_describe_interval() {
        assert_eq!(describe_interval(Duration::from_secs(3600)), "1 hour");
        assert_eq!(describe_interval(Duration::from_secs(7200)), "2 hours");
        assert_eq!(describe_interval(Duration::from_secs(90)), "90 seconds");
    }
}
