//! Typed calls to the Taker light-mining endpoints

use serde_json::Value;

use crate::error::{Error, Result};

use super::client::ApiClient;
use super::types::{Envelope, LoginData, LoginRequest, MiningStatus, NonceData, NonceRequest, UserInfo};

pub const GENERATE_NONCE: &str = "wallet/generateNonce";
pub const LOGIN: &str = "wallet/login";
pub const USER_INFO: &str = "user/getUserInfo";
pub const MINING_TIME: &str = "assignment/totalMiningTime";
pub const START_MINING: &str = "assignment/startMining";

/// Taker platform API
#[derive(Clone)]
pub struct TakerApi {
    client: ApiClient,
}

impl TakerApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Request a single-use login challenge for an address
    pub async fn generate_nonce(&self, address: &str) -> Result<String> {
        let body = serde_json::to_value(NonceRequest {
            wallet_address: address.to_string(),
        })?;

        let value = self.client.post(GENERATE_NONCE, Some(body), None).await?;
        let data: NonceData = Envelope::unwrap_data(value)?;

        data.nonce
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::MissingField("data.nonce".to_string()))
    }

    /// Exchange a signed challenge for a session token
    pub async fn login(&self, request: &LoginRequest) -> Result<String> {
        let body = serde_json::to_value(request)?;

        let value = self.client.post(LOGIN, Some(body), None).await?;
        let data: LoginData = Envelope::unwrap_data(value)?;

        data.token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::MissingField("data.token".to_string()))
    }

    pub async fn user_info(&self, token: &str) -> Result<UserInfo> {
        let value = self.client.get(USER_INFO, Some(token)).await?;
        Envelope::unwrap_data(value)
    }

    pub async fn mining_status(&self, token: &str) -> Result<MiningStatus> {
        let value = self.client.get(MINING_TIME, Some(token)).await?;
        Envelope::unwrap_data(value)
    }

    /// Off-chain acknowledgement that a mining session starts
    pub async fn start_mining(&self, token: &str) -> Result<Value> {
        self.client.post(START_MINING, None, Some(token)).await
    }
}
