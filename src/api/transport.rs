//! HTTP transport for the platform API
//!
//! A single attempt of one request. Retries live in [`super::client`].

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// One request to the platform
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. "wallet/login"
    pub endpoint: String,
    pub url: Url,
    /// Bearer session token
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// Sends a request once and returns the decoded JSON body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<Value>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<Value> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self.client.request(request.method.clone(), request.url.clone());

        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let value = response.json::<Value>().await?;
        Ok(value)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Transport answering from per-endpoint queues
    ///
    /// An endpoint with an empty queue fails like an unreachable server.
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<HashMap<String, VecDeque<Result<Value>>>>,
        calls: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_ok(&self, endpoint: &str, value: Value) {
            self.push(endpoint, Ok(value));
        }

        pub fn push_err(&self, endpoint: &str, error: Error) {
            self.push(endpoint, Err(error));
        }

        fn push(&self, endpoint: &str, response: Result<Value>) {
            self.responses
                .lock()
                .unwrap()
                .entry(endpoint.to_string())
                .or_default()
                .push_back(response);
        }

        pub fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn calls_to(&self, endpoint: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.endpoint == endpoint)
                .count()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &ApiRequest) -> Result<Value> {
            self.calls.lock().unwrap().push(request.clone());

            self.responses
                .lock()
                .unwrap()
                .get_mut(&request.endpoint)
                .and_then(|queue| queue.pop_front())
                .unwrap_or_else(|| Err(Error::Http("connection refused".to_string())))
        }
    }
}
