//! On-chain mining activation
//!
//! Sends the zero-argument `active()` call to the mining contract. Nonce and
//! gas price are read from the node on every call; nothing is cached between
//! wallets or cycles.

use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ChainConfig, ConfirmationPolicy};
use crate::error::{Error, Result};

use super::signer::parse_private_key;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IMiningActivator {
        /// Finalize a mining session started off-chain
        function active() external;
    }
}

/// Submits the activation transaction for a wallet
#[async_trait]
pub trait Activator: Send + Sync {
    /// Returns the transaction hash
    async fn activate(&self, private_key: &str) -> Result<String>;
}

/// JSON-RPC client for the fixed network/contract pair
#[derive(Debug, Clone)]
pub struct ChainClient {
    rpc_url: Url,
    contract: Address,
    gas_limit: u64,
    confirmation: ConfirmationPolicy,
    receipt_timeout: Duration,
}

impl ChainClient {
    pub fn new(config: &ChainConfig) -> Result<Self> {
        let rpc_url = Url::parse(&config.rpc_url)
            .map_err(|e| Error::Config(format!("Invalid RPC URL {}: {}", config.rpc_url, e)))?;

        let contract = config.contract_address.parse::<Address>().map_err(|e| {
            Error::Config(format!(
                "Invalid contract address {}: {}",
                config.contract_address, e
            ))
        })?;

        Ok(Self {
            rpc_url,
            contract,
            gas_limit: config.gas_limit,
            confirmation: config.confirmation,
            receipt_timeout: config.receipt_timeout(),
        })
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Reach the node and return its chain id
    pub async fn check_connection(&self) -> Result<u64> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());

        provider
            .get_chain_id()
            .await
            .map_err(|e| Error::Rpc(format!("Cannot reach {}: {}", self.rpc_url, e)))
    }

    async fn send_activation(&self, private_key: &str) -> Result<String> {
        let signer = parse_private_key(private_key)?;
        let from = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(self.rpc_url.clone());

        let nonce = provider
            .get_transaction_count(from)
            .pending()
            .await
            .map_err(|e| Error::Rpc(format!("Failed to read nonce: {}", e)))?;

        let gas_price = provider
            .get_gas_price()
            .await
            .map_err(|e| Error::Rpc(format!("Failed to read gas price: {}", e)))?;

        debug!("Activation for {}: nonce={}, gas_price={}", from, nonce, gas_price);

        let contract = IMiningActivator::new(self.contract, provider);
        let call = contract
            .active()
            .from(from)
            .nonce(nonce)
            .gas_price(gas_price);

        let gas = match call.estimate_gas().await {
            Ok(gas) => gas,
            Err(e) => {
                warn!(
                    "Gas estimation failed ({}), using fixed limit {}",
                    e, self.gas_limit
                );
                self.gas_limit
            }
        };

        let pending = call
            .gas(gas)
            .send()
            .await
            .map_err(|e| Error::TransactionSend(e.to_string()))?;

        let tx_hash = format!("{:?}", pending.tx_hash());

        match self.confirmation {
            ConfirmationPolicy::Broadcast => Ok(tx_hash),
            ConfirmationPolicy::Receipt => {
                let receipt = pending
                    .with_timeout(Some(self.receipt_timeout))
                    .get_receipt()
                    .await
                    .map_err(|e| {
                        Error::TransactionSend(format!("Confirmation of {} failed: {}", tx_hash, e))
                    })?;

                if !receipt.status() {
                    return Err(Error::TransactionReverted(tx_hash));
                }

                Ok(tx_hash)
            }
        }
    }
}

#[async_trait]
impl Activator for ChainClient {
    async fn activate(&self, private_key: &str) -> Result<String> {
        let tx_hash = self.send_activation(private_key).await?;
        info!(success = true, "Activate Mining confirmed Hash: {}", tx_hash);
        Ok(tx_hash)
    }
}
