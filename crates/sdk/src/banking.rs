/// Paystack-style banking directory: bank list and account-name resolution
use blurtpay_network::{Config as NetworkConfig, HttpClient};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{Result, SdkError};

pub const DEFAULT_BANK_API_URL: &str = "https://api.paystack.co";
pub const DEFAULT_COUNTRY: &str = "nigeria";
pub const DEFAULT_CURRENCY: &str = "NGN";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub code: String,
    pub name: String,
}

impl Bank {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// Every banking API response is wrapped in `{status, data?, message?}`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub status: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

pub struct BankingClient {
    http: HttpClient,
    currency: String,
}

impl BankingClient {
    /// `secret_key` is the banking API bearer credential; it is injected
    /// from configuration and never logged.
    pub fn new(base_url: &str, secret_key: &str, timeout_secs: u64) -> Result<Self> {
        if secret_key.trim().is_empty() {
            return Err(SdkError::Config("banking API secret key is empty".into()));
        }

        let config = NetworkConfig::new(base_url)
            .with_bearer_token(secret_key)
            .with_timeout(timeout_secs);

        Ok(Self {
            http: HttpClient::new(config)?,
            currency: DEFAULT_CURRENCY.to_string(),
        })
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch the banks eligible for payouts in `country`.
    ///
    /// Failure is degraded, not fatal: a rejected or unreachable directory
    /// yields an empty list and the caller offers a manual refresh.
    pub async fn list_banks(&self, country: &str) -> Vec<Bank> {
        let query = [("country", country), ("currency", self.currency.as_str())];
        let response = match self.http.get_json::<Envelope<Vec<Bank>>>("/bank", &query).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching banks: {}", e);
                return Vec::new();
            }
        };

        match response.body {
            Some(Envelope {
                status: true,
                data: Some(banks),
                ..
            }) => banks,
            Some(envelope) => {
                warn!(
                    "Failed to load banks ({}): {}",
                    response.status,
                    envelope.message.as_deref().unwrap_or("no message")
                );
                Vec::new()
            }
            None => {
                warn!("Failed to load banks ({}): unreadable body", response.status);
                Vec::new()
            }
        }
    }
}

pub fn find_bank<'a>(banks: &'a [Bank], code: &str) -> Option<&'a Bank> {
    banks.iter().find(|bank| bank.code == code)
}
