/// Caller-held withdrawal inputs.
///
/// The resolved account name is tied to the exact `(account number, bank)`
/// pair it was resolved for: changing either one clears it, and a resolution
/// that finishes after the inputs moved on is dropped.
use crate::banking::Bank;
use crate::request::WithdrawalMethod;
use crate::resolver::AccountResolution;

pub const ACCOUNT_NUMBER_LEN: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionTicket {
    pub seq: u64,
    pub account_number: String,
    pub bank_code: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalForm {
    method: WithdrawalMethod,
    amount: String,
    bank: Option<Bank>,
    account_number: String,
    resolved_account_name: Option<String>,
    resolution_error: Option<String>,
    wallet_address: String,
    resolution_seq: u64,
}

impl Default for WithdrawalForm {
    fn default() -> Self {
        Self {
            method: WithdrawalMethod::Naira,
            amount: String::new(),
            bank: None,
            account_number: String::new(),
            resolved_account_name: None,
            resolution_error: None,
            wallet_address: String::new(),
            resolution_seq: 0,
        }
    }
}

impl WithdrawalForm {
    pub fn new(method: WithdrawalMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn method(&self) -> WithdrawalMethod {
        self.method
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn bank(&self) -> Option<&Bank> {
        self.bank.as_ref()
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn resolved_account_name(&self) -> Option<&str> {
        self.resolved_account_name.as_deref()
    }

    pub fn resolution_error(&self) -> Option<&str> {
        self.resolution_error.as_deref()
    }

    pub fn wallet_address(&self) -> &str {
        &self.wallet_address
    }

    pub fn set_method(&mut self, method: WithdrawalMethod) {
        if self.method != method {
            self.method = method;
            self.invalidate_resolution();
        }
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.trim().to_string();
    }

    pub fn set_account_number(&mut self, account_number: &str) {
        let account_number = account_number.trim();
        if self.account_number != account_number {
            self.account_number = account_number.to_string();
            self.invalidate_resolution();
        }
    }

    pub fn select_bank(&mut self, bank: Option<Bank>) {
        let changed = self.bank.as_ref().map(|b| &b.code) != bank.as_ref().map(|b| &b.code);
        self.bank = bank;
        if changed {
            self.invalidate_resolution();
        }
    }

    pub fn set_wallet_address(&mut self, address: &str) {
        self.wallet_address = address.trim().to_string();
    }

    /// The `(account number, bank code)` pair to resolve, once the inputs
    /// are complete enough for the resolver to be worth calling.
    pub fn resolution_target(&self) -> Option<(&str, &str)> {
        if self.method != WithdrawalMethod::Naira {
            return None;
        }
        let bank = self.bank.as_ref()?;
        if bank.code.is_empty() || !is_account_number(&self.account_number) {
            return None;
        }
        Some((&self.account_number, &bank.code))
    }

    /// Start a resolution attempt. Any attempt already in flight is
    /// superseded; its result will be rejected by `apply_resolution`.
    pub fn begin_resolution(&mut self) -> Option<ResolutionTicket> {
        let (account_number, bank_code) = self.resolution_target()?;
        let ticket = ResolutionTicket {
            seq: self.resolution_seq + 1,
            account_number: account_number.to_string(),
            bank_code: bank_code.to_string(),
        };
        self.resolution_seq = ticket.seq;
        self.resolved_account_name = None;
        self.resolution_error = None;
        Some(ticket)
    }

    /// Apply a finished resolution. Returns `false` when the result is stale.
    pub fn apply_resolution(&mut self, ticket: &ResolutionTicket, resolution: AccountResolution) -> bool {
        if ticket.seq != self.resolution_seq {
            return false;
        }
        let target = Some((ticket.account_number.as_str(), ticket.bank_code.as_str()));
        if self.resolution_target() != target {
            return false;
        }

        match resolution {
            AccountResolution::Success { account_name } => {
                self.resolved_account_name = Some(account_name);
                self.resolution_error = None;
            }
            AccountResolution::Failure { message } => {
                self.resolved_account_name = None;
                self.resolution_error = Some(message);
            }
        }
        true
    }

    /// Back to the initial empty state. The method selection is kept.
    pub fn reset(&mut self) {
        let method = self.method;
        let seq = self.resolution_seq;
        *self = Self::new(method);
        // keep counting so results from before the reset stay stale
        self.resolution_seq = seq + 1;
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_empty()
            && self.bank.is_none()
            && self.account_number.is_empty()
            && self.resolved_account_name.is_none()
            && self.resolution_error.is_none()
            && self.wallet_address.is_empty()
    }

    fn invalidate_resolution(&mut self) {
        self.resolution_seq += 1;
        self.resolved_account_name = None;
        self.resolution_error = None;
    }
}

pub fn is_account_number(value: &str) -> bool {
    value.len() == ACCOUNT_NUMBER_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gtb() -> Bank {
        Bank::new("058", "Guaranty Trust Bank")
    }

    fn resolved_form() -> WithdrawalForm {
        let mut form = WithdrawalForm::new(WithdrawalMethod::Naira);
        form.select_bank(Some(gtb()));
        form.set_account_number("0123456789");
        let ticket = form.begin_resolution().unwrap();
        assert!(form.apply_resolution(
            &ticket,
            AccountResolution::Success {
                account_name: "ADA LOVELACE".into()
            }
        ));
        form
    }

    #[test]
    fn test_resolution_target_requires_ten_digits() {
        let mut form = WithdrawalForm::new(WithdrawalMethod::Naira);
        form.select_bank(Some(gtb()));

        for number in ["", "012345678", "01234567890", "01234abcde"] {
            form.set_account_number(number);
            assert!(form.resolution_target().is_none(), "{:?}", number);
            assert!(form.begin_resolution().is_none());
        }

        form.set_account_number("0123456789");
        assert_eq!(form.resolution_target(), Some(("0123456789", "058")));
    }

    #[test]
    fn test_resolution_target_requires_bank_and_naira() {
        let mut form = WithdrawalForm::new(WithdrawalMethod::Naira);
        form.set_account_number("0123456789");
        assert!(form.resolution_target().is_none());

        form.select_bank(Some(gtb()));
        assert!(form.resolution_target().is_some());

        form.set_method(WithdrawalMethod::StablecoinUsdt);
        assert!(form.resolution_target().is_none());
    }

    #[test]
    fn test_changing_account_number_clears_name() {
        let mut form = resolved_form();
        assert_eq!(form.resolved_account_name(), Some("ADA LOVELACE"));

        form.set_account_number("0123456780");
        assert!(form.resolved_account_name().is_none());
    }

    #[test]
    fn test_changing_bank_clears_name() {
        let mut form = resolved_form();
        form.select_bank(Some(Bank::new("044", "Access Bank")));
        assert!(form.resolved_account_name().is_none());

        let mut form = resolved_form();
        form.select_bank(None);
        assert!(form.resolved_account_name().is_none());
    }

    #[test]
    fn test_switching_method_clears_name() {
        let mut form = resolved_form();
        form.set_method(WithdrawalMethod::StablecoinUsdt);
        assert!(form.resolved_account_name().is_none());

        form.set_method(WithdrawalMethod::Naira);
        assert!(form.resolved_account_name().is_none());
        // inputs survive, so a fresh lookup can run for the same pair
        assert_eq!(form.resolution_target(), Some(("0123456789", "058")));
    }

    #[test]
    fn test_same_inputs_keep_name() {
        let mut form = resolved_form();
        form.set_account_number("0123456789");
        form.select_bank(Some(gtb()));
        form.set_amount("1000");
        assert_eq!(form.resolved_account_name(), Some("ADA LOVELACE"));
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let mut form = WithdrawalForm::new(WithdrawalMethod::Naira);
        form.select_bank(Some(gtb()));
        form.set_account_number("0123456789");
        let first = form.begin_resolution().unwrap();

        form.set_account_number("9876543210");
        let second = form.begin_resolution().unwrap();
        assert!(second.seq > first.seq);

        assert!(form.apply_resolution(
            &second,
            AccountResolution::Success {
                account_name: "GRACE HOPPER".into()
            }
        ));
        // late answer for the old number must not overwrite
        assert!(!form.apply_resolution(
            &first,
            AccountResolution::Success {
                account_name: "ADA LOVELACE".into()
            }
        ));
        assert_eq!(form.resolved_account_name(), Some("GRACE HOPPER"));
    }

    #[test]
    fn test_superseded_ticket_for_same_inputs_is_discarded() {
        let mut form = WithdrawalForm::new(WithdrawalMethod::Naira);
        form.select_bank(Some(gtb()));
        form.set_account_number("0123456789");
        let first = form.begin_resolution().unwrap();
        let second = form.begin_resolution().unwrap();

        assert!(!form.apply_resolution(
            &first,
            AccountResolution::Failure {
                message: "timeout".into()
            }
        ));
        assert!(form.apply_resolution(
            &second,
            AccountResolution::Success {
                account_name: "ADA LOVELACE".into()
            }
        ));
    }

    #[test]
    fn test_failure_sets_error() {
        let mut form = WithdrawalForm::new(WithdrawalMethod::Naira);
        form.select_bank(Some(gtb()));
        form.set_account_number("0123456789");
        let ticket = form.begin_resolution().unwrap();
        form.apply_resolution(
            &ticket,
            AccountResolution::Failure {
                message: "Could not resolve account name".into(),
            },
        );

        assert!(form.resolved_account_name().is_none());
        assert_eq!(form.resolution_error(), Some("Could not resolve account name"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = resolved_form();
        form.set_amount("2000");
        let pending = form.begin_resolution().unwrap();
        form.reset();

        assert!(form.is_empty());
        assert_eq!(form.method(), WithdrawalMethod::Naira);
        assert!(!form.apply_resolution(
            &pending,
            AccountResolution::Success {
                account_name: "ADA LOVELACE".into()
            }
        ));
    }
}
