use serde::Deserialize;
use tracing::{debug, error};

use crate::banking::{BankingClient, Envelope};
use crate::error::SdkError;

pub const UNRESOLVED_MESSAGE: &str = "Unable to resolve account name";
pub const RESOLVE_ERROR_MESSAGE: &str = "Error resolving account name";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountResolution {
    Success { account_name: String },
    Failure { message: String },
}

impl AccountResolution {
    pub fn account_name(&self) -> Option<&str> {
        match self {
            AccountResolution::Success { account_name } => Some(account_name),
            AccountResolution::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> crate::Result<String> {
        match self {
            AccountResolution::Success { account_name } => Ok(account_name),
            AccountResolution::Failure { message } => Err(SdkError::Resolution(message)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResolvedAccount {
    account_name: Option<String>,
}

impl BankingClient {
    /// Look up the registered holder of `account_number` at `bank_code`.
    ///
    /// Callers gate this on a 10-digit number and a selected bank; nothing
    /// is re-checked here.
    pub async fn resolve_account_name(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> AccountResolution {
        let query = [("account_number", account_number), ("bank_code", bank_code)];
        let response = match self
            .http()
            .get_json::<Envelope<ResolvedAccount>>("/bank/resolve", &query)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Account resolve error: {}", e);
                return AccountResolution::Failure {
                    message: RESOLVE_ERROR_MESSAGE.to_string(),
                };
            }
        };

        let Some(envelope) = response.body else {
            debug!("Resolve returned {} without a readable body", response.status);
            return AccountResolution::Failure {
                message: UNRESOLVED_MESSAGE.to_string(),
            };
        };

        match envelope.data.and_then(|d| d.account_name) {
            Some(account_name) if envelope.status && !account_name.trim().is_empty() => {
                AccountResolution::Success { account_name }
            }
            _ => AccountResolution::Failure {
                message: envelope
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| UNRESOLVED_MESSAGE.to_string()),
            },
        }
    }
}
