use blurtpay_network::{Config as NetworkConfig, HttpClient};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::request::WithdrawalRequest;

pub const DEFAULT_TRADE_API_URL: &str = "https://bitapi-0m8c.onrender.com";
pub const WITHDRAW_PATH: &str = "/api/withdraw";
pub const WITHDRAW_OK: &str = "Withdrawal successful!";
pub const WITHDRAW_FAILED: &str = "Withdrawal failed.";
pub const WITHDRAW_ERROR: &str = "Withdrawal error";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitResult {
    Ok(String),
    Failed(String),
}

impl SubmitResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, SubmitResult::Ok(_))
    }

    pub fn message(&self) -> &str {
        match self {
            SubmitResult::Ok(message) | SubmitResult::Failed(message) => message,
        }
    }
}

/// Trade backend replies carry an optional human-readable message.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageReply {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl MessageReply {
    pub fn text(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

pub struct TradeClient {
    http: HttpClient,
}

impl TradeClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let config = NetworkConfig::new(base_url).with_timeout(timeout_secs);
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    /// POST the withdrawal. Never errors: every failure is folded into
    /// `SubmitResult::Failed` with the text the user should see.
    pub async fn submit(&self, request: &WithdrawalRequest) -> SubmitResult {
        let payload = request.to_payload();
        info!(
            "Submitting {} withdrawal of {} for {}",
            request.method().tag(),
            request.amount,
            request.requester_id
        );

        let response = match self
            .http
            .post_json::<_, MessageReply>(WITHDRAW_PATH, &payload)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Withdraw error: {}", e);
                return SubmitResult::Failed(WITHDRAW_ERROR.to_string());
            }
        };

        let ok = response.is_success();
        let message = response.body.and_then(MessageReply::text);

        if ok {
            SubmitResult::Ok(message.unwrap_or_else(|| WITHDRAW_OK.to_string()))
        } else {
            warn!("Withdrawal rejected ({}): {:?}", response.status, message);
            SubmitResult::Failed(message.unwrap_or_else(|| WITHDRAW_FAILED.to_string()))
        }
    }
}
