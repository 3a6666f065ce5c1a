use async_trait::async_trait;
use blurtpay_sdk::{Identity, IdentityProvider, Result};

/// Signed-in user taken from `BLURTPAY_EMAIL` / `BLURTPAY_USER_ID`.
pub struct EnvSession {
    identity: Option<Identity>,
}

impl EnvSession {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let email = lookup("BLURTPAY_EMAIL").filter(|s| !s.trim().is_empty());
        let id = lookup("BLURTPAY_USER_ID").filter(|s| !s.trim().is_empty());
        let identity = match (email, id) {
            (Some(email), Some(id)) => Some(Identity { email, id }),
            _ => None,
        };
        Self { identity }
    }
}

#[async_trait]
impl IdentityProvider for EnvSession {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        Ok(self.identity.clone())
    }
}
