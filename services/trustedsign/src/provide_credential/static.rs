use crate::Credential;
use async_trait::async_trait;
use trustedsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed app key and secret.
///
/// This provider is used when the key and secret are known up front, for
/// example when they come from an explicit [`crate::Config`].
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with app key and secret.
    pub fn new(key: &str, secret: &str) -> Self {
        Self {
            credential: Credential::new(key, secret),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let ctx = Context::new();

        let provider = StaticCredentialProvider::new("test_app_key", "test_app_secret");
        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.key(), "test_app_key");
        assert_eq!(cred.secret(), "test_app_secret");

        Ok(())
    }
}
