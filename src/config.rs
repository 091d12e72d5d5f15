//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Platform REST API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_invitation_code")]
    pub invitation_code: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// When false, 4xx responses are returned after a single attempt
    #[serde(default = "default_true")]
    pub retry_client_errors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// Gas limit used when estimation fails
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    #[serde(default)]
    pub confirmation: ConfirmationPolicy,
    /// Upper bound on a receipt wait in `receipt` mode
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
}

/// Whether an activation returns on broadcast or waits for its receipt
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    #[default]
    Broadcast,
    Receipt,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Pause between two passes over the wallet set
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Cooldown between two mining sessions of the same wallet
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_wallet_text")]
    pub wallet_text: PathBuf,
    #[serde(default = "default_wallet_json")]
    pub wallet_json: PathBuf,
}

impl ApiConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ChainConfig {
    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            invitation_code: default_invitation_code(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_ms: default_timeout_ms(),
            retry_client_errors: true,
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
            gas_limit: default_gas_limit(),
            confirmation: ConfirmationPolicy::default(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            wallet_text: default_wallet_text(),
            wallet_json: default_wallet_json(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://lightmining-api.taker.xyz/".to_string()
}

fn default_invitation_code() -> String {
    "M3XT6".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    3_000
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_true() -> bool {
    true
}

fn default_rpc_url() -> String {
    "https://rpc-mainnet.taker.xyz/".to_string()
}

fn default_contract_address() -> String {
    "0xB3eFE5105b835E5Dd9D206445Dbd66DF24b912AB".to_string()
}

fn default_gas_limit() -> u64 {
    200_000
}

fn default_receipt_timeout_secs() -> u64 {
    120
}

fn default_interval_secs() -> u64 {
    3_600
}

fn default_cooldown_secs() -> i64 {
    86_400
}

fn default_wallet_text() -> PathBuf {
    PathBuf::from("data").join("wallet.txt")
}

fn default_wallet_json() -> PathBuf {
    PathBuf::from("data").join("wallets.json")
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix TAKER_)
            .add_source(
                config::Environment::with_prefix("TAKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.api.max_attempts == 0 {
            anyhow::bail!("api.max_attempts must be at least 1");
        }

        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid api.base_url: {}", self.api.base_url))?;

        url::Url::parse(&self.chain.rpc_url)
            .with_context(|| format!("Invalid chain.rpc_url: {}", self.chain.rpc_url))?;

        self.chain
            .contract_address
            .parse::<alloy::primitives::Address>()
            .with_context(|| {
                format!("Invalid chain.contract_address: {}", self.chain.contract_address)
            })?;

        if self.chain.receipt_timeout_secs == 0 {
            anyhow::bail!("chain.receipt_timeout_secs must be positive");
        }

        if self.scheduler.interval_secs == 0 {
            anyhow::bail!("scheduler.interval_secs must be positive");
        }

        if self.scheduler.cooldown_secs <= 0 {
            anyhow::bail!("scheduler.cooldown_secs must be positive");
        }

        if self.api.invitation_code.trim().is_empty() {
            tracing::warn!("api.invitation_code is empty - login may be rejected");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            chain: ChainConfig::default(),
            scheduler: SchedulerConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}
