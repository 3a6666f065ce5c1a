use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SdkError};

pub const NOT_AUTHENTICATED: &str = "User not authenticated.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub id: String,
}

/// The auth backend's view of who is signed in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_identity(&self) -> Result<Option<Identity>>;
}

pub struct SessionGuard;

impl SessionGuard {
    /// Identity of the signed-in user, or `Authentication` when there is
    /// none. Provider failures are treated the same as a missing session.
    pub async fn require(provider: &dyn IdentityProvider) -> Result<Identity> {
        match provider.current_identity().await {
            Ok(Some(identity)) if !identity.email.is_empty() && !identity.id.is_empty() => {
                Ok(identity)
            }
            Ok(_) => Err(SdkError::Authentication(NOT_AUTHENTICATED.to_string())),
            Err(e) => {
                warn!("Identity lookup failed: {}", e);
                Err(SdkError::Authentication(NOT_AUTHENTICATED.to_string()))
            }
        }
    }
}

/// Fixed identity, for callers that already know who is signed in.
pub struct StaticIdentity(pub Option<Identity>);

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenProvider;

    #[async_trait]
    impl IdentityProvider for BrokenProvider {
        async fn current_identity(&self) -> Result<Option<Identity>> {
            Err(SdkError::RemoteRejection("session expired".into()))
        }
    }

    #[tokio::test]
    async fn test_present_identity_passes() {
        let provider = StaticIdentity(Some(Identity {
            email: "ada@example.com".into(),
            id: "u1".into(),
        }));
        let identity = SessionGuard::require(&provider).await.unwrap();
        assert_eq!(identity.id, "u1");
    }

    #[tokio::test]
    async fn test_absent_identity_refused() {
        let result = SessionGuard::require(&StaticIdentity(None)).await;
        assert!(matches!(result, Err(SdkError::Authentication(ref m)) if m == NOT_AUTHENTICATED));
    }

    #[tokio::test]
    async fn test_provider_error_refused() {
        let result = SessionGuard::require(&BrokenProvider).await;
        assert!(matches!(result, Err(SdkError::Authentication(_))));
    }

    #[test]
    fn test_blank_identity_refused() {
        let provider = StaticIdentity(Some(Identity {
            email: String::new(),
            id: "u1".into(),
        }));
        assert!(tokio_test::block_on(SessionGuard::require(&provider)).is_err());
    }
}
