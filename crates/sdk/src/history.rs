/// Past withdrawal and BLURT transfer requests for a user.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SdkError};
use crate::submitter::{MessageReply, TradeClient};

pub const HISTORY_PATH: &str = "/api/get-my-requests";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    pub id: serde_json::Value,
    /// Account holder name the payout went to.
    #[serde(default)]
    pub bank_username: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub sent_or_pending: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WithdrawalRecord {
    /// Missing or null amounts read as zero.
    pub fn amount(&self) -> Decimal {
        self.amount.unwrap_or_default()
    }

    pub fn status(&self) -> &str {
        self.sent_or_pending.as_deref().unwrap_or("pending")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: serde_json::Value,
    /// Receiving BLURT username.
    #[serde(default)]
    pub busername: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TransferRecord {
    pub fn amount(&self) -> Decimal {
        self.amount.unwrap_or_default()
    }

    pub fn status(&self) -> &'static str {
        if self.read {
            "Sent"
        } else {
            "Pending"
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHistory {
    #[serde(default)]
    pub withdrawals: Vec<WithdrawalRecord>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}

#[derive(Serialize)]
struct HistoryQuery<'a> {
    email: &'a str,
}

impl TradeClient {
    pub async fn fetch_my_requests(&self, email: &str) -> Result<RequestHistory> {
        let response = self
            .http()
            .post_json::<_, serde_json::Value>(HISTORY_PATH, &HistoryQuery { email })
            .await?;

        if !response.is_success() {
            let message = response
                .body
                .and_then(|body| serde_json::from_value::<MessageReply>(body).ok())
                .and_then(MessageReply::text)
                .unwrap_or_else(|| format!("request history failed ({})", response.status));
            warn!("API error: {}", message);
            return Err(SdkError::RemoteRejection(message));
        }

        let body = response
            .body
            .ok_or_else(|| SdkError::RemoteRejection("request history body was not JSON".into()))?;
        serde_json::from_value(body)
            .map_err(|e| SdkError::RemoteRejection(format!("unexpected history shape: {}", e)))
    }
}

/// `₦12,500.00`
pub fn format_naira(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2).abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₦{}.{}", sign, grouped, fraction)
}

/// `12.500 BLURT`
pub fn format_blurt(amount: Decimal) -> String {
    format!("{:.3} BLURT", amount.round_dp(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_parses_both_lists() {
        let json = r#"{
            "withdrawals": [
                {"id": 7, "bank_username": "ADA LOVELACE", "amount": "12500", "bank_name": "GTBank",
                 "account_number": "0123456789", "sent_or_pending": "pending", "created_at": "2025-07-01T10:00:00Z"}
            ],
            "transfers": [
                {"id": "c1", "busername": "ada", "amount": 20.5, "read": true, "created_at": "2025-07-02T09:00:00Z"}
            ]
        }"#;

        let history: RequestHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.withdrawals.len(), 1);
        assert_eq!(history.withdrawals[0].status(), "pending");
        assert_eq!(history.transfers[0].status(), "Sent");
        assert_eq!(format_naira(history.withdrawals[0].amount()), "₦12,500.00");
        assert_eq!(format_blurt(history.transfers[0].amount()), "20.500 BLURT");
    }

    #[test]
    fn test_null_amount_does_not_break_history() {
        let json = r#"{
            "withdrawals": [
                {"id": 1, "amount": null, "sent_or_pending": "pending"},
                {"id": 2, "amount": 700}
            ],
            "transfers": [{"id": 3, "busername": "ada", "read": false}]
        }"#;

        let history: RequestHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.withdrawals.len(), 2);
        assert_eq!(format_naira(history.withdrawals[0].amount()), "₦0.00");
        assert_eq!(history.withdrawals[1].amount(), Decimal::from(700));
        assert_eq!(format_blurt(history.transfers[0].amount()), "0.000 BLURT");
        assert_eq!(history.transfers[0].status(), "Pending");
    }

    #[test]
    fn test_missing_lists_default_empty() {
        let history: RequestHistory = serde_json::from_str(r#"{"withdrawals": []}"#).unwrap();
        assert!(history.withdrawals.is_empty());
        assert!(history.transfers.is_empty());
    }

    #[test]
    fn test_format_naira() {
        assert_eq!(format_naira(Decimal::from(12500)), "₦12,500.00");
        assert_eq!(format_naira("1234567.891".parse().unwrap()), "₦1,234,567.89");
        assert_eq!(format_naira(Decimal::from(500)), "₦500.00");
        assert_eq!(format_naira(Decimal::ZERO), "₦0.00");
        assert_eq!(format_naira(Decimal::from(-1500)), "-₦1,500.00");
    }
}
