pub mod banking;
pub mod error;
pub mod form;
pub mod history;
pub mod profile;
pub mod rates;
pub mod request;
pub mod resolver;
pub mod session;
pub mod submitter;
pub mod trading;
pub mod validator;
pub mod workflow;

pub use banking::{Bank, BankingClient, DEFAULT_COUNTRY};
pub use error::{Result, SdkError};
pub use form::{ResolutionTicket, WithdrawalForm};
pub use history::{RequestHistory, TransferRecord, WithdrawalRecord};
pub use profile::{Profile, ProfileProvider, SupabaseProfiles};
pub use rates::RateClient;
pub use request::{WithdrawalDestination, WithdrawalMethod, WithdrawalPayload, WithdrawalRequest};
pub use resolver::AccountResolution;
pub use session::{Identity, IdentityProvider, SessionGuard};
pub use submitter::{SubmitResult, TradeClient};
pub use trading::TradeSide;
pub use validator::{validate, ValidatedWithdrawal};
pub use workflow::{AttemptOutcome, WithdrawalWorkflow};
