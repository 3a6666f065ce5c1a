/// Drives one withdrawal: bank list → account resolution → validate →
/// session check → submit
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::banking::{find_bank, Bank, BankingClient, DEFAULT_COUNTRY};
use crate::error::{Result, SdkError};
use crate::form::{ResolutionTicket, WithdrawalForm};
use crate::request::WithdrawalMethod;
use crate::resolver::AccountResolution;
use crate::session::{IdentityProvider, SessionGuard};
use crate::submitter::{SubmitResult, TradeClient};
use crate::validator::validate;

/// How a submit attempt ended. Only `Succeeded` clears the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    Rejected(String),
    Unauthenticated(String),
    Succeeded(String),
    Failed(String),
}

impl AttemptOutcome {
    pub fn message(&self) -> &str {
        match self {
            AttemptOutcome::Rejected(m)
            | AttemptOutcome::Unauthenticated(m)
            | AttemptOutcome::Succeeded(m)
            | AttemptOutcome::Failed(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Succeeded(_))
    }
}

/// The form sits behind an async mutex that is never held across a network
/// call, so a new account-name lookup can start while an older one is still
/// in flight. Whichever finishes for inputs that are no longer current is
/// dropped.
pub struct WithdrawalWorkflow {
    banking: BankingClient,
    trade: TradeClient,
    identity: Arc<dyn IdentityProvider>,
    country: String,
    banks: Vec<Bank>,
    form: Mutex<WithdrawalForm>,
}

impl WithdrawalWorkflow {
    pub fn new(
        banking: BankingClient,
        trade: TradeClient,
        identity: Arc<dyn IdentityProvider>,
        method: WithdrawalMethod,
    ) -> Self {
        Self {
            banking,
            trade,
            identity,
            country: DEFAULT_COUNTRY.to_string(),
            banks: Vec::new(),
            form: Mutex::new(WithdrawalForm::new(method)),
        }
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    /// Fetch (or refetch) the bank directory. An empty result means the
    /// directory is unavailable; the previous list is replaced either way.
    pub async fn load_banks(&mut self) -> &[Bank] {
        self.banks = self.banking.list_banks(&self.country).await;
        if self.banks.is_empty() {
            warn!("Bank directory is empty; bank withdrawals unavailable until refresh");
        } else {
            debug!("Loaded {} banks", self.banks.len());
        }
        &self.banks
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    /// Snapshot of the current inputs.
    pub async fn form(&self) -> WithdrawalForm {
        self.form.lock().await.clone()
    }

    pub async fn set_amount(&self, amount: &str) {
        self.form.lock().await.set_amount(amount);
    }

    pub async fn set_wallet_address(&self, address: &str) {
        self.form.lock().await.set_wallet_address(address);
    }

    pub async fn set_method(&self, method: WithdrawalMethod) -> Option<AccountResolution> {
        let ticket = {
            let mut form = self.form.lock().await;
            form.set_method(method);
            form.begin_resolution()?
        };
        self.finish_resolution(ticket).await
    }

    pub async fn set_account_number(&self, account_number: &str) -> Option<AccountResolution> {
        let ticket = {
            let mut form = self.form.lock().await;
            form.set_account_number(account_number);
            form.begin_resolution()?
        };
        self.finish_resolution(ticket).await
    }

    /// Select a bank from the loaded directory by its code.
    pub async fn select_bank(&self, code: &str) -> Result<Option<AccountResolution>> {
        let bank = find_bank(&self.banks, code)
            .cloned()
            .ok_or_else(|| SdkError::InvalidInput(format!("unknown bank code: {}", code)))?;
        let ticket = {
            let mut form = self.form.lock().await;
            form.select_bank(Some(bank));
            form.begin_resolution()
        };
        match ticket {
            Some(ticket) => Ok(self.finish_resolution(ticket).await),
            None => Ok(None),
        }
    }

    pub async fn clear_bank(&self) {
        self.form.lock().await.select_bank(None);
    }

    /// Resolve the account name for the current inputs, superseding any
    /// lookup still in flight.
    pub async fn refresh_resolution(&self) -> Option<AccountResolution> {
        let ticket = self.form.lock().await.begin_resolution()?;
        self.finish_resolution(ticket).await
    }

    /// Returns the resolution that was applied, or `None` when the answer
    /// arrived for a superseded attempt.
    async fn finish_resolution(&self, ticket: ResolutionTicket) -> Option<AccountResolution> {
        let resolution = self
            .banking
            .resolve_account_name(&ticket.account_number, &ticket.bank_code)
            .await;

        let mut form = self.form.lock().await;
        if form.apply_resolution(&ticket, resolution.clone()) {
            Some(resolution)
        } else {
            debug!("Dropped stale resolution #{}", ticket.seq);
            None
        }
    }

    pub async fn submit(&self) -> AttemptOutcome {
        let validated = match validate(&*self.form.lock().await) {
            Ok(validated) => validated,
            Err(e) => {
                debug!("Withdrawal rejected locally: {}", e);
                return AttemptOutcome::Rejected(e.to_string());
            }
        };

        let identity = match SessionGuard::require(self.identity.as_ref()).await {
            Ok(identity) => identity,
            Err(e) => return AttemptOutcome::Unauthenticated(e.to_string()),
        };

        let request = validated.into_request(&identity);
        match self.trade.submit(&request).await {
            SubmitResult::Ok(message) => {
                info!("Withdrawal accepted for {}: {}", identity.id, message);
                self.form.lock().await.reset();
                AttemptOutcome::Succeeded(message)
            }
            SubmitResult::Failed(reason) => AttemptOutcome::Failed(reason),
        }
    }
}
