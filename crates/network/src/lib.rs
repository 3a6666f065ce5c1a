//! HTTP transport shared by the blurtpay clients: one `reqwest` client per
//! backend, a bounded timeout on every call and an optional bearer credential.
//!
//! ```rust,no_run
//! use blurtpay_network::{Config, HttpClient};
//!
//! #[tokio::main]
//! async fn main() -> blurtpay_network::Result<()> {
//!     let config = Config::new("https://api.paystack.co").with_bearer_token("sk_live_...");
//!     let client = HttpClient::new(config)?;
//!
//!     let banks: blurtpay_network::ApiResponse<serde_json::Value> =
//!         client.get_json("/bank", &[("country", "nigeria")]).await?;
//!     println!("status: {}", banks.status);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http_client;

pub use config::{Config, Secret, DEFAULT_TIMEOUT_SECS};
pub use error::{NetworkError, Result};
pub use http_client::{ApiResponse, HttpClient};
