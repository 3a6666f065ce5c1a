use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::banking::Bank;
use crate::session::Identity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalMethod {
    #[serde(rename = "naira")]
    Naira,
    #[serde(rename = "usdt")]
    StablecoinUsdt,
}

impl WithdrawalMethod {
    /// Smallest amount the trade backend accepts, in the method's own unit.
    pub fn minimum(&self) -> Decimal {
        match self {
            WithdrawalMethod::Naira => Decimal::from(500),
            WithdrawalMethod::StablecoinUsdt => Decimal::from(5),
        }
    }

    pub fn minimum_message(&self) -> &'static str {
        match self {
            WithdrawalMethod::Naira => "Minimum withdrawal is ₦500",
            WithdrawalMethod::StablecoinUsdt => "Minimum USDT withdrawal is $5",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            WithdrawalMethod::Naira => "naira",
            WithdrawalMethod::StablecoinUsdt => "usdt",
        }
    }
}

impl std::str::FromStr for WithdrawalMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naira" | "ngn" => Ok(WithdrawalMethod::Naira),
            "usdt" => Ok(WithdrawalMethod::StablecoinUsdt),
            other => Err(format!("unknown withdrawal method: {}", other)),
        }
    }
}

/// Where the money goes. Each method carries only its own fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WithdrawalDestination {
    Bank {
        bank: Bank,
        account_number: String,
        account_name: String,
    },
    Wallet {
        address: String,
    },
}

impl WithdrawalDestination {
    pub fn method(&self) -> WithdrawalMethod {
        match self {
            WithdrawalDestination::Bank { .. } => WithdrawalMethod::Naira,
            WithdrawalDestination::Wallet { .. } => WithdrawalMethod::StablecoinUsdt,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub requester_email: String,
    pub requester_id: String,
    pub amount: Decimal,
    pub destination: WithdrawalDestination,
}

impl WithdrawalRequest {
    pub fn new(identity: &Identity, amount: Decimal, destination: WithdrawalDestination) -> Self {
        Self {
            requester_email: identity.email.clone(),
            requester_id: identity.id.clone(),
            amount,
            destination,
        }
    }

    pub fn method(&self) -> WithdrawalMethod {
        self.destination.method()
    }

    pub fn to_payload(&self) -> WithdrawalPayload {
        let mut payload = WithdrawalPayload {
            email: self.requester_email.clone(),
            amount: self.amount,
            method: self.method(),
            user_id: self.requester_id.clone(),
            bank: None,
            account_name: None,
            account_number: None,
            wallet_address: None,
        };

        match &self.destination {
            WithdrawalDestination::Bank {
                bank,
                account_number,
                account_name,
            } => {
                payload.bank = Some(bank.name.clone());
                payload.account_name = Some(account_name.clone());
                payload.account_number = Some(account_number.clone());
            }
            WithdrawalDestination::Wallet { address } => {
                payload.wallet_address = Some(address.clone());
            }
        }

        payload
    }
}

/// JSON body of `POST /api/withdraw`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WithdrawalPayload {
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub method: WithdrawalMethod,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(rename = "accountName", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(rename = "accountNumber", skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(rename = "walletAddress", skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}
