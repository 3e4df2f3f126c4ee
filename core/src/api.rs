use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used by the client to validate a credential
/// before it is used for signing.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is usable.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used to load a credential from the
/// environment, a config value, or any other source.
///
/// Returning `Ok(None)` means "not found here"; callers may fall back to
/// another provider.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load credential from the context.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}
