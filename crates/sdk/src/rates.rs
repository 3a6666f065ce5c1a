/// BLURT → NGN spot rate from the public price API.
use blurtpay_network::{Config as NetworkConfig, HttpClient};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, SdkError};

pub const DEFAULT_RATE_API_URL: &str = "https://api.coingecko.com";
pub const PRICE_PATH: &str = "/api/v3/simple/price";

#[derive(Debug, Deserialize)]
struct PriceReply {
    blurt: Option<BlurtPrice>,
}

#[derive(Debug, Deserialize)]
struct BlurtPrice {
    ngn: Option<Decimal>,
}

pub struct RateClient {
    http: HttpClient,
}

impl RateClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let config = NetworkConfig::new(base_url).with_timeout(timeout_secs);
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Naira per BLURT.
    pub async fn blurt_to_ngn(&self) -> Result<Decimal> {
        let query = [("ids", "blurt"), ("vs_currencies", "ngn")];
        let response = self.http.get_json::<PriceReply>(PRICE_PATH, &query).await?;

        if !response.is_success() {
            warn!("Failed to fetch Blurt rate: status {}", response.status);
            return Err(SdkError::RemoteRejection(format!(
                "rate lookup failed ({})",
                response.status
            )));
        }

        response
            .body
            .and_then(|reply| reply.blurt)
            .and_then(|price| price.ngn)
            .ok_or_else(|| SdkError::RemoteRejection("BLURT/NGN rate unavailable".into()))
    }
}

/// Naira value of `blurt` at `rate`, to kobo precision.
pub fn blurt_value_in_ngn(blurt: Decimal, rate: Decimal) -> Decimal {
    (blurt * rate).round_dp(2)
}
