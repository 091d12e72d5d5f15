//! Platform API client with bounded retry
//!
//! Every failed attempt is logged. After the attempt budget is spent the last
//! error is returned to the caller, which decides what a failure means for
//! the wallet being processed.

use backoff::future::retry;
use reqwest::Method;
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Error, Result};

use super::retry::RetryPolicy;
use super::transport::{ApiRequest, HttpTransport, Transport};

/// Authenticated GET/POST client for the reward platform
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl ApiClient {
    /// Create a client over an arbitrary transport
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, policy: RetryPolicy) -> Result<Self> {
        // Url::join drops the last path segment unless it ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized)
            .map_err(|e| Error::Config(format!("Invalid API base URL {}: {}", base_url, e)))?;

        Ok(Self {
            base_url,
            transport,
            policy,
        })
    }

    /// Create a reqwest-backed client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Self::new(
            &config.base_url,
            Arc::new(transport),
            RetryPolicy::from_config(config),
        )
    }

    /// GET an endpoint, optionally with a bearer token
    pub async fn get(&self, endpoint: &str, token: Option<&str>) -> Result<Value> {
        self.request(Method::GET, endpoint, None, token).await
    }

    /// POST an endpoint with an optional JSON body
    pub async fn post(&self, endpoint: &str, body: Option<Value>, token: Option<&str>) -> Result<Value> {
        self.request(Method::POST, endpoint, body, token).await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<Value> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| Error::Config(format!("Invalid endpoint {}: {}", endpoint, e)))?;

        let request = ApiRequest {
            method,
            endpoint: endpoint.to_string(),
            url,
            token: token.map(str::to_string),
            body,
        };

        let (result, attempts) = self.send_with_retry(&request).await;

        match &result {
            Ok(_) => debug!("{} {} succeeded", request.method, endpoint),
            Err(e) => error!(
                "Giving up on {} {} after {} attempt(s): {}",
                request.method, endpoint, attempts, e
            ),
        }

        result
    }

    /// Run the retry loop, returning the outcome and the attempts made
    async fn send_with_retry(&self, request: &ApiRequest) -> (Result<Value>, u32) {
        let policy = self.policy;
        let attempts = AtomicU32::new(0);

        let result = retry(policy.backoff(), || async {
            attempts.fetch_add(1, Ordering::Relaxed);
            match self.transport.send(request).await {
                Ok(value) => Ok(value),
                Err(e) => {
                    error!("Request failed ({} {}): {}", request.method, request.endpoint, e);
                    if policy.should_retry(&e) {
                        Err(backoff::Error::transient(e))
                    } else {
                        Err(backoff::Error::permanent(e))
                    }
                }
            }
        })
        .await;

        (result, attempts.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::ScriptedTransport;
    use serde_json::json;
    use std::time::Duration;
    #[allow(unused_imports)]
    use tokio_test::assert_ok;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::ZERO,
            retry_client_errors: true,
        }
    }

    fn client(transport: &Arc<ScriptedTransport>, policy: RetryPolicy) -> ApiClient {
        ApiClient::new("https://api.example.test", transport.clone(), policy).unwrap()
    }

    #[tokio::test]
    async fn test_failing_request_attempted_exactly_three_times() {
        let transport = Arc::new(ScriptedTransport::new());
        let api = client(&transport, fast_policy(3));

        let result = api.get("user/getUserInfo", Some("t1")).await;

        assert!(matches!(result, Err(Error::Http(_))));
        assert_eq!(transport.calls_to("user/getUserInfo"), 3);
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_err("wallet/login", Error::Http("timeout".into()));
        transport.push_err(
            "wallet/login",
            Error::HttpStatus {
                status: 502,
                body: "bad gateway".into(),
            },
        );
        transport.push_ok("wallet/login", json!({"data": {"token": "t1"}}));
        let api = client(&transport, fast_policy(3));

        let value = api.post("wallet/login", Some(json!({})), None).await.unwrap();

        assert_eq!(value["data"]["token"], "t1");
        assert_eq!(transport.calls_to("wallet/login"), 3);
    }

    #[tokio::test]
    async fn test_no_retry_after_success() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok("assignment/totalMiningTime", json!({"data": {}}));
        let api = client(&transport, fast_policy(3));

        tokio_test::assert_ok!(api.get("assignment/totalMiningTime", Some("t1")).await);
        assert_eq!(transport.calls_to("assignment/totalMiningTime"), 1);
    }

    #[tokio::test]
    async fn test_client_error_not_retried_when_disabled() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_err(
            "wallet/login",
            Error::HttpStatus {
                status: 400,
                body: "bad request".into(),
            },
        );
        let policy = RetryPolicy {
            retry_client_errors: false,
            ..fast_policy(3)
        };
        let api = client(&transport, policy);

        let result = api.post("wallet/login", None, None).await;

        assert!(matches!(result, Err(Error::HttpStatus { status: 400, .. })));
        assert_eq!(transport.calls_to("wallet/login"), 1);
    }

    #[tokio::test]
    async fn test_attempts_counted_per_outcome() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_err(
            "wallet/login",
            Error::HttpStatus {
                status: 401,
                body: "unauthorized".into(),
            },
        );
        let policy = RetryPolicy {
            retry_client_errors: false,
            ..fast_policy(3)
        };
        let api = client(&transport, policy);
        let request = ApiRequest {
            method: Method::POST,
            endpoint: "wallet/login".to_string(),
            url: Url::parse("https://api.example.test/wallet/login").unwrap(),
            token: None,
            body: None,
        };

        let (result, attempts) = api.send_with_retry(&request).await;
        assert!(result.is_err());
        assert_eq!(attempts, 1);

        // Empty queue: transient failures until the budget is spent
        let (result, attempts) = api.send_with_retry(&request).await;
        assert!(result.is_err());
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok("wallet/generateNonce", json!({"data": {"nonce": "abc"}}));
        let api = client(&transport, fast_policy(3));

        api.post(
            "wallet/generateNonce",
            Some(json!({"walletAddress": "0xAAA"})),
            Some("t1"),
        )
        .await
        .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(
            calls[0].url.as_str(),
            "https://api.example.test/wallet/generateNonce"
        );
        assert_eq!(calls[0].token.as_deref(), Some("t1"));
        assert_eq!(calls[0].body, Some(json!({"walletAddress": "0xAAA"})));
    }

    #[tokio::test]
    async fn test_retry_delay_is_honoured() {
        let transport = Arc::new(ScriptedTransport::new());
        let api = client(
            &transport,
            RetryPolicy {
                max_attempts: 3,
                delay: Duration::from_millis(20),
                retry_client_errors: true,
            },
        );

        let start = std::time::Instant::now();
        let _ = api.get("user/getUserInfo", None).await;

        // Two waits between three attempts, none after the last
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(transport.calls_to("user/getUserInfo"), 3);
    }
}
