use async_trait::async_trait;
use blurtpay_network::{Config as NetworkConfig, HttpClient};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SdkError};
use crate::session::Identity;

pub const USERS_PATH: &str = "/rest/v1/users";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Naira balance, `balance` in the users table.
    #[serde(rename = "balance", default)]
    pub naira_balance: Option<Decimal>,
    /// BLURT balance, `bbalance` in the users table.
    #[serde(rename = "bbalance", default)]
    pub blurt_balance: Option<Decimal>,
}

impl Profile {
    pub fn naira_display(&self) -> String {
        format!("{:.2}", self.naira_balance.unwrap_or_default().round_dp(2))
    }

    pub fn blurt_display(&self) -> String {
        format!("{:.4}", self.blurt_balance.unwrap_or_default().round_dp(4))
    }
}

/// Read side of the user profile. Callers refresh balances through this
/// after a successful withdrawal; the workflow itself never does.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn profile(&self, identity: &Identity) -> Result<Profile>;
}

/// Row ids come back as either text or integers depending on the column type.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(n) => n.to_string(),
    })
}

/// Reads the `users` table through the hosted REST gateway. The anon key
/// goes in both the `apikey` header and the bearer token.
pub struct SupabaseProfiles {
    http: HttpClient,
}

impl SupabaseProfiles {
    pub fn new(base_url: &str, anon_key: &str, timeout_secs: u64) -> Result<Self> {
        if anon_key.trim().is_empty() {
            return Err(SdkError::Config("Supabase anon key is required".into()));
        }
        let config = NetworkConfig::new(base_url)
            .with_timeout(timeout_secs)
            .with_header("apikey", anon_key)
            .with_bearer_token(anon_key);
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl ProfileProvider for SupabaseProfiles {
    async fn profile(&self, identity: &Identity) -> Result<Profile> {
        let filter = format!("eq.{}", identity.email);
        let query = [("select", "*"), ("email", filter.as_str())];
        let response = self
            .http
            .get_json::<Vec<Profile>>(USERS_PATH, &query)
            .await?;

        if !response.is_success() {
            warn!("Profile lookup failed with status {}", response.status);
            return Err(SdkError::RemoteRejection(format!(
                "profile lookup failed ({})",
                response.status
            )));
        }

        let profile = response
            .body
            .and_then(|rows| rows.into_iter().next())
            .ok_or_else(|| SdkError::RemoteRejection("Profile not found".into()))?;
        debug!("Loaded profile {}", profile.id);
        Ok(profile)
    }
}
