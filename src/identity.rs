use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

/// Capability for obtaining an opaque caller identifier. The backend keeps
/// no session state; the identifier only labels a client.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self) -> anyhow::Result<String>;
}

/// Default provider: mints a fresh anonymous identifier per call.
pub struct AnonymousIdentity;

#[async_trait]
impl IdentityProvider for AnonymousIdentity {
    async fn sign_in(&self) -> anyhow::Result<String> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// Identifier used when a provider fails; a pure function of nothing but
/// the failure itself.
pub fn fallback_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// Single capability call with fallback. Provider failures are logged and
/// never surface to the caller.
pub async fn obtain_user_id(provider: &dyn IdentityProvider) -> String {
    match provider.sign_in().await {
        Ok(user_id) => user_id,
        Err(e) => {
            warn!("Identity provider failed, using fallback id: {e}");
            fallback_user_id()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingIdentity;

    #[async_trait]
    impl IdentityProvider for FailingIdentity {
        async fn sign_in(&self) -> anyhow::Result<String> {
            anyhow::bail!("provider unavailable")
        }
    }

    #[tokio::test]
    async fn anonymous_provider_returns_unique_ids() {
        let provider = AnonymousIdentity;
        let first = obtain_user_id(&provider).await;
        let second = obtain_user_id(&provider).await;
        assert!(Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn failure_falls_back_to_random_id() {
        let user_id = obtain_user_id(&FailingIdentity).await;
        assert!(Uuid::parse_str(&user_id).is_ok());
    }

    #[test]
    fn fallback_ids_are_well_formed() {
        assert!(Uuid::parse_str(&fallback_user_id()).is_ok());
    }
}
