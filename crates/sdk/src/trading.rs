/// BLURT buy and sell orders against the naira balance.
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::submitter::{MessageReply, SubmitResult, TradeClient};

pub const BUY_PATH: &str = "/api/buy-blurt";
pub const SELL_PATH: &str = "/api/sell-blurt";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount.";
pub const UNEXPECTED_ERROR: &str = "Unexpected error occurred.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn path(self) -> &'static str {
        match self {
            TradeSide::Buy => BUY_PATH,
            TradeSide::Sell => SELL_PATH,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            TradeSide::Buy => "Buy successful!",
            TradeSide::Sell => "Sell successful!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            TradeSide::Buy => "Failed to buy Blurt",
            TradeSide::Sell => "Failed to sell Blurt",
        }
    }
}

#[derive(Serialize)]
struct TradeOrder<'a> {
    email: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

impl TradeClient {
    pub async fn buy_blurt(&self, email: &str, amount: Decimal) -> SubmitResult {
        self.trade(TradeSide::Buy, email, amount).await
    }

    pub async fn sell_blurt(&self, email: &str, amount: Decimal) -> SubmitResult {
        self.trade(TradeSide::Sell, email, amount).await
    }

    /// Success text is fixed; a rejection shows the backend's `error` when
    /// it sent one.
    pub async fn trade(&self, side: TradeSide, email: &str, amount: Decimal) -> SubmitResult {
        if amount <= Decimal::ZERO {
            return SubmitResult::Failed(INVALID_AMOUNT.to_string());
        }
        info!("Placing {:?} order of {} for {}", side, amount, email);

        let response = match self
            .http()
            .post_json::<_, MessageReply>(side.path(), &TradeOrder { email, amount })
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("{:?} order error: {}", side, e);
                return SubmitResult::Failed(UNEXPECTED_ERROR.to_string());
            }
        };

        if response.is_success() {
            return SubmitResult::Ok(side.success_message().to_string());
        }

        let reason = response
            .body
            .and_then(|reply| reply.error)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| side.failure_message().to_string());
        warn!("{:?} order rejected ({}): {}", side, response.status, reason);
        SubmitResult::Failed(reason)
    }
}
