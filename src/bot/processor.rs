//! Per-wallet mining cycle
//!
//! ```text
//! nonce → sign → login → profile → mining status → start mining → activate
//! ```
//!
//! Any failed step ends the wallet's turn for this cycle with a [`SkipReason`].
//! Start-mining and activation are never retried against each other: once the
//! platform acknowledged a session, a failed activation is reported and the
//! next cycle re-reads the mining status from scratch.

use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::api::types::display_field;
use crate::api::{LoginRequest, TakerApi, UserInfo};
use crate::chain::signer::same_address;
use crate::chain::{address_of, sign_message, Activator};
use crate::wallet::Wallet;

/// Why a wallet was not mined this cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NonceUnavailable,
    SigningFailed,
    LoginFailed,
    ProfileUnavailable,
    /// No X/Twitter account linked; the platform pays no rewards
    SocialUnbound,
    StatusUnavailable,
    /// Cooldown still running; unix seconds of the next allowed start
    NotEligible { next_eligible: i64 },
    StartMiningFailed,
    ActivationFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonceUnavailable => write!(f, "nonce unavailable"),
            SkipReason::SigningFailed => write!(f, "signing failed"),
            SkipReason::LoginFailed => write!(f, "login failed"),
            SkipReason::ProfileUnavailable => write!(f, "profile unavailable"),
            SkipReason::SocialUnbound => write!(f, "not bound to Twitter/X"),
            SkipReason::StatusUnavailable => write!(f, "mining status unavailable"),
            SkipReason::NotEligible { next_eligible } => {
                write!(f, "not eligible until {}", format_timestamp(*next_eligible))
            }
            SkipReason::StartMiningFailed => write!(f, "start mining failed"),
            SkipReason::ActivationFailed => write!(f, "on-chain activation failed"),
        }
    }
}

/// Result of one wallet's turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletOutcome {
    Processed { tx_hash: String },
    Skipped(SkipReason),
}

impl WalletOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, WalletOutcome::Processed { .. })
    }
}

/// Local time rendering of a unix timestamp
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Runs the login/status/mining sequence for one wallet at a time
pub struct WalletProcessor {
    api: TakerApi,
    activator: Arc<dyn Activator>,
    invitation_code: String,
    cooldown_secs: i64,
}

impl WalletProcessor {
    pub fn new(
        api: TakerApi,
        activator: Arc<dyn Activator>,
        invitation_code: impl Into<String>,
        cooldown_secs: i64,
    ) -> Self {
        Self {
            api,
            activator,
            invitation_code: invitation_code.into(),
            cooldown_secs,
        }
    }

    /// Attempt a full mining cycle for `wallet`
    pub async fn process(&self, wallet: &Wallet) -> WalletOutcome {
        match self.mine(wallet).await {
            Ok(tx_hash) => {
                info!(success = true, "Wallet {} mining activated", wallet.address);
                WalletOutcome::Processed { tx_hash }
            }
            Err(reason) => {
                debug!("Wallet {} skipped: {}", wallet.address, reason);
                WalletOutcome::Skipped(reason)
            }
        }
    }

    async fn mine(&self, wallet: &Wallet) -> Result<String, SkipReason> {
        let address = wallet.address.as_str();

        let nonce = self.api.generate_nonce(address).await.map_err(|e| {
            error!("Failed to get nonce for {}: {}", address, e);
            SkipReason::NonceUnavailable
        })?;

        let signature = sign_message(&nonce, &wallet.private_key).map_err(|e| {
            error!("Error signing message for {}: {}", address, e);
            SkipReason::SigningFailed
        })?;

        if let Ok(derived) = address_of(&wallet.private_key) {
            if !same_address(&derived.to_string(), address) {
                warn!(
                    "Private key of {} controls {}, login will likely fail",
                    address, derived
                );
            }
        }

        let request = LoginRequest {
            address: address.to_string(),
            invitation_code: self.invitation_code.clone(),
            message: nonce,
            signature,
        };

        let token = self.api.login(&request).await.map_err(|e| {
            error!("Login failed for {}: {}", address, e);
            SkipReason::LoginFailed
        })?;
        info!(success = true, "Login successful for {}", address);

        let user = self.api.user_info(&token).await.map_err(|e| {
            error!("Failed to get user info for {}: {}", address, e);
            SkipReason::ProfileUnavailable
        })?;
        log_profile(&user);

        if !user.is_social_bound() {
            error!("Wallet {} not bound to Twitter/X", address);
            return Err(SkipReason::SocialUnbound);
        }

        let status = self.api.mining_status(&token).await.map_err(|e| {
            error!("Failed to get mining status for {}: {}", address, e);
            SkipReason::StatusUnavailable
        })?;

        let now = Utc::now().timestamp();
        if !status.is_eligible(now, self.cooldown_secs) {
            let next_eligible = status.next_eligible_at(self.cooldown_secs);
            warn!("Next mining: {}", format_timestamp(next_eligible));
            return Err(SkipReason::NotEligible { next_eligible });
        }

        self.api.start_mining(&token).await.map_err(|e| {
            error!("Start mining failed for {}: {}", address, e);
            SkipReason::StartMiningFailed
        })?;
        info!(success = true, "Mining session started for {}", address);

        self.activator
            .activate(&wallet.private_key)
            .await
            .map_err(|e| {
                error!("Activate Mining Error: {}", e);
                error!("On-chain mining failed for {}", address);
                SkipReason::ActivationFailed
            })
    }
}

fn log_profile(user: &UserInfo) {
    info!("UserID: {}", display_field(&user.user_id));
    info!("Wallet Address: {}", display_field(&user.wallet_address));
    info!("Reward Amount: {}", display_field(&user.reward_amount));
    info!("Invite Count: {}", display_field(&user.invite_count));
    info!("Invitation Reward: {}", display_field(&user.invitation_reward));
    info!("Total Reward: {}", display_field(&user.total_reward));
    info!("Twitter: {}", user.tw_name.as_deref().unwrap_or("N/A"));
}
