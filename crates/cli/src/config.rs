use blurtpay_sdk::banking::{DEFAULT_BANK_API_URL, DEFAULT_COUNTRY};
use blurtpay_sdk::rates::DEFAULT_RATE_API_URL;
use blurtpay_sdk::submitter::DEFAULT_TRADE_API_URL;
use blurtpay_sdk::{BankingClient, RateClient, SupabaseProfiles, TradeClient};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct CliConfig {
    pub bank_api_url: String,
    pub trade_api_url: String,
    /// Banking API bearer credential. Only bank listing and resolution need it.
    pub paystack_secret: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub rate_api_url: String,
    pub country: String,
    pub timeout_secs: u64,
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bank_api_url = lookup("BANK_API_URL").unwrap_or_else(|| DEFAULT_BANK_API_URL.to_string());
        let trade_api_url =
            lookup("TRADE_API_URL").unwrap_or_else(|| DEFAULT_TRADE_API_URL.to_string());
        let paystack_secret = lookup("PAYSTACK_SECRET_KEY").filter(|s| !s.trim().is_empty());
        let supabase_url = lookup("SUPABASE_URL").filter(|s| !s.trim().is_empty());
        let supabase_anon_key = lookup("SUPABASE_ANON_KEY").filter(|s| !s.trim().is_empty());
        let rate_api_url =
            lookup("COINGECKO_API_URL").unwrap_or_else(|| DEFAULT_RATE_API_URL.to_string());
        let country = lookup("BANK_COUNTRY").unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a number of seconds: {}", e))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            bank_api_url,
            trade_api_url,
            paystack_secret,
            supabase_url,
            supabase_anon_key,
            rate_api_url,
            country,
            timeout_secs,
        })
    }

    pub fn banking_client(&self) -> anyhow::Result<BankingClient> {
        let secret = self
            .paystack_secret
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("PAYSTACK_SECRET_KEY is not set"))?;
        Ok(BankingClient::new(&self.bank_api_url, secret, self.timeout_secs)?)
    }

    pub fn trade_client(&self) -> anyhow::Result<TradeClient> {
        Ok(TradeClient::new(&self.trade_api_url, self.timeout_secs)?)
    }

    pub fn profile_provider(&self) -> anyhow::Result<SupabaseProfiles> {
        let url = self
            .supabase_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("SUPABASE_URL is not set"))?;
        let key = self
            .supabase_anon_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("SUPABASE_ANON_KEY is not set"))?;
        Ok(SupabaseProfiles::new(url, key, self.timeout_secs)?)
    }

    pub fn rate_client(&self) -> anyhow::Result<RateClient> {
        Ok(RateClient::new(&self.rate_api_url, self.timeout_secs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<CliConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bank_api_url, DEFAULT_BANK_API_URL);
        assert_eq!(config.trade_api_url, DEFAULT_TRADE_API_URL);
        assert_eq!(config.country, "nigeria");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.paystack_secret.is_none());
        assert!(config.banking_client().is_err());
        assert_eq!(config.rate_api_url, DEFAULT_RATE_API_URL);
        assert!(config.profile_provider().is_err());
    }

    #[test]
    fn test_profile_provider_needs_url_and_key() {
        let config = config_from(&[("SUPABASE_URL", "https://example.supabase.co")]).unwrap();
        assert!(config.profile_provider().is_err());

        let config = config_from(&[
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("COINGECKO_API_URL", "http://localhost:9000"),
        ])
        .unwrap();
        assert!(config.profile_provider().is_ok());
        assert_eq!(config.rate_api_url, "http://localhost:9000");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PAYSTACK_SECRET_KEY", "sk_test_1"),
            ("TRADE_API_URL", "http://localhost:4000"),
            ("HTTP_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.paystack_secret.as_deref(), Some("sk_test_1"));
        assert_eq!(config.trade_api_url, "http://localhost:4000");
        assert_eq!(config.timeout_secs, 3);
        assert!(config.banking_client().is_ok());
    }

    #[test]
    fn test_bad_timeout() {
        assert!(config_from(&[("HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("HTTP_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_blank_secret_is_unset() {
        let config = config_from(&[("PAYSTACK_SECRET_KEY", "  ")]).unwrap();
        assert!(config.paystack_secret.is_none());
    }
}
