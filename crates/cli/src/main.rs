use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blurtpay_sdk::history::{format_blurt, format_naira};
use blurtpay_sdk::rates::blurt_value_in_ngn;
use blurtpay_sdk::trading::INVALID_AMOUNT;
use blurtpay_sdk::validator::parse_amount;
use blurtpay_sdk::{
    AccountResolution, AttemptOutcome, Identity, ProfileProvider, SessionGuard, SubmitResult,
    TradeSide, WithdrawalMethod, WithdrawalWorkflow,
};

mod config;
mod session;

use config::CliConfig;
use session::EnvSession;

#[derive(Parser)]
#[command(name = "blurtpay", about = "BLURT wallet withdrawals from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List banks that accept payouts
    Banks,
    /// Look up the holder name of a bank account
    Resolve {
        #[arg(long)]
        bank_code: String,
        #[arg(long)]
        account_number: String,
    },
    /// Request a withdrawal to a bank account (naira) or a USDT wallet
    Withdraw {
        #[arg(long, default_value = "naira")]
        method: WithdrawalMethod,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        bank_code: Option<String>,
        #[arg(long)]
        account_number: Option<String>,
        #[arg(long)]
        wallet_address: Option<String>,
    },
    /// Show past withdrawal and BLURT transfer requests
    History,
    /// Show current balances
    Balance,
    /// Buy BLURT with the naira balance
    Buy {
        #[arg(long)]
        amount: String,
    },
    /// Sell BLURT into the naira balance
    Sell {
        #[arg(long)]
        amount: String,
    },
    /// Show the BLURT to naira rate, optionally converting an amount
    Rate {
        #[arg(long)]
        amount: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blurtpay=info,blurtpay_sdk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let config = CliConfig::from_env()?;
    let session = Arc::new(EnvSession::from_env());

    let cli = Cli::parse();
    match cli.command {
        Command::Banks => {
            let banking = config.banking_client()?;
            let banks = banking.list_banks(&config.country).await;
            if banks.is_empty() {
                anyhow::bail!("Failed to load banks");
            }
            for bank in banks {
                println!("{:>8}  {}", bank.code, bank.name);
            }
        }
        Command::Resolve {
            bank_code,
            account_number,
        } => {
            let account_number = account_number_arg(&account_number)?;
            let banking = config.banking_client()?;
            let name = banking
                .resolve_account_name(account_number, bank_code.trim())
                .await
                .into_result()?;
            println!("Account Name: {}", name);
        }
        Command::Withdraw {
            method,
            amount,
            bank_code,
            account_number,
            wallet_address,
        } => {
            let mut workflow = WithdrawalWorkflow::new(
                config.banking_client()?,
                config.trade_client()?,
                session.clone(),
                method,
            )
            .with_country(&config.country);

            workflow.set_amount(&amount).await;
            match method {
                WithdrawalMethod::Naira => {
                    if workflow.load_banks().await.is_empty() {
                        warn!("Failed to load banks");
                    }
                    if let Some(code) = bank_code.as_deref() {
                        workflow.select_bank(code).await?;
                    }
                    if let Some(number) = account_number.as_deref() {
                        match workflow.set_account_number(number).await {
                            Some(AccountResolution::Success { account_name }) => {
                                println!("Account Name: {}", account_name)
                            }
                            Some(AccountResolution::Failure { message }) => {
                                eprintln!("{}", message)
                            }
                            None => {}
                        }
                    }
                }
                WithdrawalMethod::StablecoinUsdt => {
                    workflow
                        .set_wallet_address(wallet_address.as_deref().unwrap_or_default())
                        .await;
                }
            }

            match workflow.submit().await {
                AttemptOutcome::Succeeded(message) => {
                    println!("Success: {}", message);
                    if let Ok(identity) = SessionGuard::require(session.as_ref()).await {
                        refresh_balances(&config, &identity).await;
                    }
                }
                outcome => anyhow::bail!("{}", outcome.message()),
            }
        }
        Command::History => {
            let identity = SessionGuard::require(session.as_ref()).await?;
            let trade = config.trade_client()?;
            let history = trade.fetch_my_requests(&identity.email).await?;

            println!("Withdraw Requests");
            if history.withdrawals.is_empty() {
                println!("  No withdraw requests found.");
            }
            for req in &history.withdrawals {
                println!(
                    "  {:<24} {:>16} {:<24} {:<10} {}",
                    req.bank_username.as_deref().unwrap_or("-"),
                    format_naira(req.amount()),
                    req.bank_name.as_deref().unwrap_or("-"),
                    req.account_number.as_deref().unwrap_or("-"),
                    req.status()
                );
            }

            println!("BLURT Transfer Requests");
            if history.transfers.is_empty() {
                println!("  No transfer requests found.");
            }
            for tx in &history.transfers {
                println!(
                    "  {:<24} {:>18} {:<8} {}",
                    tx.busername.as_deref().unwrap_or("-"),
                    format_blurt(tx.amount()),
                    tx.status(),
                    tx.created_at.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Balance => {
            let identity = SessionGuard::require(session.as_ref()).await?;
            let profile = config.profile_provider()?.profile(&identity).await?;
            println!("Naira balance: ₦{}", profile.naira_display());
            println!("BLURT balance: {}", profile.blurt_display());
        }
        Command::Buy { amount } => trade(&config, &session, TradeSide::Buy, &amount).await?,
        Command::Sell { amount } => trade(&config, &session, TradeSide::Sell, &amount).await?,
        Command::Rate { amount } => {
            let rate = config.rate_client()?.blurt_to_ngn().await?;
            println!("1 BLURT = {}", format_naira(rate));
            if let Some(raw) = amount {
                let blurt = parse_amount(&raw).ok_or_else(|| anyhow::anyhow!(INVALID_AMOUNT))?;
                println!("{} = {}", format_blurt(blurt), format_naira(blurt_value_in_ngn(blurt, rate)));
            }
        }
    }

    Ok(())
}

/// Trimmed account number, or an error if it is not exactly ten digits.
fn account_number_arg(raw: &str) -> anyhow::Result<&str> {
    let trimmed = raw.trim();
    if !blurtpay_sdk::form::is_account_number(trimmed) {
        anyhow::bail!("Account number must be exactly 10 digits");
    }
    Ok(trimmed)
}

async fn trade(
    config: &CliConfig,
    session: &EnvSession,
    side: TradeSide,
    raw_amount: &str,
) -> anyhow::Result<()> {
    let amount = parse_amount(raw_amount).ok_or_else(|| anyhow::anyhow!(INVALID_AMOUNT))?;
    let identity = SessionGuard::require(session).await?;
    match config.trade_client()?.trade(side, &identity.email, amount).await {
        SubmitResult::Ok(message) => {
            println!("Success: {}", message);
            refresh_balances(config, &identity).await;
            Ok(())
        }
        SubmitResult::Failed(reason) => anyhow::bail!("{}", reason),
    }
}

/// Balance refresh after a completed action. Failures only warn.
async fn refresh_balances(config: &CliConfig, identity: &Identity) {
    let profiles = match config.profile_provider() {
        Ok(profiles) => profiles,
        Err(e) => {
            warn!("Skipping balance refresh: {}", e);
            return;
        }
    };

    match profiles.profile(identity).await {
        Ok(profile) => {
            info!("Refreshed profile for {}", profile.id);
            println!("Naira balance: ₦{}", profile.naira_display());
            println!("BLURT balance: {}", profile.blurt_display());
        }
        Err(e) => warn!("Could not refresh balances: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_number_arg_is_trimmed() {
        assert_eq!(account_number_arg(" 0123456789\n").unwrap(), "0123456789");
        assert_eq!(account_number_arg("0123456789").unwrap(), "0123456789");
        assert!(account_number_arg("012345678").is_err());
        assert!(account_number_arg(" 01234 56789").is_err());
    }

    #[test]
    fn test_cli_parses_trade_and_rate() {
        let cli = Cli::try_parse_from(["blurtpay", "sell", "--amount", "12.5"]).unwrap();
        assert!(matches!(cli.command, Command::Sell { ref amount } if amount == "12.5"));

        let cli = Cli::try_parse_from(["blurtpay", "rate"]).unwrap();
        assert!(matches!(cli.command, Command::Rate { amount: None }));
    }
}
