//! Platform API module
//!
//! ```text
//! TakerApi (typed endpoints) → ApiClient (retry) → Transport (one attempt)
//! ```

pub mod client;
pub mod endpoints;
pub mod retry;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use endpoints::TakerApi;
pub use retry::{FixedAttempts, RetryPolicy};
pub use transport::{ApiRequest, HttpTransport, Transport};
pub use types::{LoginRequest, MiningStatus, UserInfo};
