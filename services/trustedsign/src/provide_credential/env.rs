use crate::{constants::*, Credential};
use async_trait::async_trait;
use trustedsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads TrustedSign credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `TRUSTEDSIGN_APP_KEY`: The app key
/// - `TRUSTEDSIGN_APP_SECRET`: The app secret
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let key = ctx.env_var(TRUSTEDSIGN_APP_KEY).filter(|v| !v.is_empty());
        let secret = ctx.env_var(TRUSTEDSIGN_APP_SECRET).filter(|v| !v.is_empty());

        match (key, secret) {
            (Some(key), Some(secret)) => Ok(Some(Credential::new(key, secret))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trustedsign_core::StaticEnv;

    #[tokio::test]
    async fn test_env_credential_provider() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (TRUSTEDSIGN_APP_KEY, "test_app_key"),
            (TRUSTEDSIGN_APP_SECRET, "test_app_secret"),
        ]));

        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx).await?;
        assert!(cred.is_some());
        let cred = cred.unwrap();
        assert_eq!(cred.key(), "test_app_key");
        assert_eq!(cred.secret(), "test_app_secret");

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_missing_credentials() -> anyhow::Result<()> {
        let ctx = Context::new();

        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx).await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_partial_credentials() -> anyhow::Result<()> {
        // Only the key, and an empty secret.
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (TRUSTEDSIGN_APP_KEY, "test_app_key"),
            (TRUSTEDSIGN_APP_SECRET, ""),
        ]));

        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx).await?;
        assert!(cred.is_none());

        Ok(())
    }
}
