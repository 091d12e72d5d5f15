//! Request and response payloads of the Taker platform API

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};

/// Every platform response wraps its payload in `data`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a response body and unwrap `data`
    pub fn unwrap_data(value: Value) -> Result<T> {
        let envelope: Envelope<T> = serde_json::from_value(value)
            .map_err(|e| Error::Deserialization(format!("Unexpected response shape: {}", e)))?;

        envelope
            .data
            .ok_or_else(|| Error::MissingField("data".to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceRequest {
    pub wallet_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NonceData {
    pub nonce: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub address: String,
    pub invitation_code: String,
    /// The nonce that was signed
    pub message: String,
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: Option<String>,
}

/// Profile returned by user/getUserInfo
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: Option<Value>,
    pub wallet_address: Option<Value>,
    pub reward_amount: Option<Value>,
    pub invite_count: Option<Value>,
    pub invitation_reward: Option<Value>,
    pub total_reward: Option<Value>,
    /// Linked X/Twitter handle
    pub tw_name: Option<String>,
}

impl UserInfo {
    /// Rewards only accrue for wallets linked to an X/Twitter account
    pub fn is_social_bound(&self) -> bool {
        self.tw_name
            .as_deref()
            .map(|name| !name.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Render an optional profile value, `N/A` when absent
pub fn display_field(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Payload of assignment/totalMiningTime
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningStatus {
    /// Unix seconds; absent when the wallet never mined
    #[serde(default, deserialize_with = "unix_seconds")]
    pub last_mining_time: Option<i64>,
}

/// Accept integer or fractional timestamps, truncating the fraction
fn unix_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))))
}

impl MiningStatus {
    pub fn last_mining_time(&self) -> i64 {
        self.last_mining_time.unwrap_or(0)
    }

    /// Earliest unix time at which mining may start again
    pub fn next_eligible_at(&self, cooldown_secs: i64) -> i64 {
        self.last_mining_time().saturating_add(cooldown_secs)
    }

    pub fn is_eligible(&self, now: i64, cooldown_secs: i64) -> bool {
        now >= self.next_eligible_at(cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_data() {
        let nonce: NonceData = Envelope::unwrap_data(json!({"data": {"nonce": "abc"}})).unwrap();
        assert_eq!(nonce.nonce.as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_data_is_missing_field() {
        let result: Result<NonceData> = Envelope::unwrap_data(json!({"code": 500}));
        assert!(matches!(result, Err(Error::MissingField(_))));

        let result: Result<NonceData> = Envelope::unwrap_data(json!({"data": null}));
        assert!(matches!(result, Err(Error::MissingField(_))));
    }

    #[test]
    fn test_login_request_serialization() {
        let request = LoginRequest {
            address: "0xAAA".to_string(),
            invitation_code: "M3XT6".to_string(),
            message: "abc".to_string(),
            signature: "0x01".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["invitationCode"], "M3XT6");
        assert_eq!(json["message"], "abc");
    }

    #[test]
    fn test_social_binding() {
        let bound: UserInfo = serde_json::from_value(json!({"twName": "taker_fan"})).unwrap();
        assert!(bound.is_social_bound());

        let empty: UserInfo = serde_json::from_value(json!({"twName": ""})).unwrap();
        assert!(!empty.is_social_bound());

        let null: UserInfo = serde_json::from_value(json!({"twName": null})).unwrap();
        assert!(!null.is_social_bound());
    }

    #[test]
    fn test_display_field() {
        assert_eq!(display_field(&None), "N/A");
        assert_eq!(display_field(&Some(json!(null))), "N/A");
        assert_eq!(display_field(&Some(json!("u-1"))), "u-1");
        assert_eq!(display_field(&Some(json!(12.5))), "12.5");
    }

    #[test]
    fn test_eligibility_boundary() {
        let status = MiningStatus {
            last_mining_time: Some(1_000),
        };

        assert_eq!(status.next_eligible_at(86_400), 87_400);
        assert!(!status.is_eligible(87_399, 86_400));
        assert!(status.is_eligible(87_400, 86_400));
    }

    #[test]
    fn test_fractional_mining_time_truncated() {
        let status: MiningStatus =
            Envelope::unwrap_data(json!({"data": {"lastMiningTime": 1000.75}})).unwrap();
        assert_eq!(status.last_mining_time(), 1_000);

        let status: MiningStatus =
            serde_json::from_value(json!({"lastMiningTime": 1_700_000_000})).unwrap();
        assert_eq!(status.last_mining_time(), 1_700_000_000);

        let status: MiningStatus = serde_json::from_value(json!({"lastMiningTime": null})).unwrap();
        assert_eq!(status.last_mining_time, None);
    }

    #[test]
    fn test_never_mined_is_eligible() {
        let status: MiningStatus = serde_json::from_value(json!({})).unwrap();
        assert_eq!(status.last_mining_time(), 0);
        assert!(status.is_eligible(1_700_000_000, 86_400));
    }
}
