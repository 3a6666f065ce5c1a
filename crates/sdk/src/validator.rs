use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, SdkError};
use crate::form::WithdrawalForm;
use crate::request::{WithdrawalDestination, WithdrawalMethod, WithdrawalRequest};
use crate::session::Identity;

pub const INVALID_AMOUNT: &str = "Enter a valid amount.";
pub const MISSING_BANK_DETAILS: &str = "Fill in all valid bank details.";
pub const MISSING_WALLET: &str = "Enter your USDT wallet address.";

/// Form contents that passed every rule, waiting for an identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedWithdrawal {
    pub amount: Decimal,
    pub destination: WithdrawalDestination,
}

impl ValidatedWithdrawal {
    pub fn into_request(self, identity: &Identity) -> WithdrawalRequest {
        WithdrawalRequest::new(identity, self.amount, self.destination)
    }
}

pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(raw.trim()).ok()?;
    (amount > Decimal::ZERO).then_some(amount)
}

/// Check the form before anything touches the network. The first failing
/// rule wins: amount, method minimum, then the method's required fields.
pub fn validate(form: &WithdrawalForm) -> Result<ValidatedWithdrawal> {
    let amount = parse_amount(form.amount())
        .ok_or_else(|| SdkError::Validation(INVALID_AMOUNT.to_string()))?;

    let method = form.method();
    if amount < method.minimum() {
        return Err(SdkError::Validation(method.minimum_message().to_string()));
    }

    let destination = match method {
        WithdrawalMethod::Naira => {
            let bank = form.bank().filter(|b| !b.code.is_empty());
            let account_name = form.resolved_account_name().filter(|n| !n.trim().is_empty());
            match (bank, account_name) {
                (Some(bank), Some(account_name)) if !form.account_number().is_empty() => {
                    WithdrawalDestination::Bank {
                        bank: bank.clone(),
                        account_number: form.account_number().to_string(),
                        account_name: account_name.to_string(),
                    }
                }
                _ => return Err(SdkError::Validation(MISSING_BANK_DETAILS.to_string())),
            }
        }
        WithdrawalMethod::StablecoinUsdt => {
            if form.wallet_address().is_empty() {
                return Err(SdkError::Validation(MISSING_WALLET.to_string()));
            }
            WithdrawalDestination::Wallet {
                address: form.wallet_address().to_string(),
            }
        }
    };

    Ok(ValidatedWithdrawal {
        amount,
        destination,
    })
}
