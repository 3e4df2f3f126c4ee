//! TrustedSign request signing.

use log::debug;
use trustedsign_core::hash::{hex_md5, hex_md5_concat};
use trustedsign_core::time::{format_unix_seconds, now, unix_nanos, DateTime};
use trustedsign_core::utils::Redact;
use trustedsign_core::HeaderBag;

use super::constants::*;
use super::credential::Credential;

/// RequestSigner produces the four authentication headers of a TrustedSign
/// request.
///
/// ## Format
///
/// ```text
/// App-Key   = key
/// Nonce     = hex(md5(unix_nanos + random_u64))
/// Timestamp = unix_seconds
/// Signature = hex(md5(secret + Nonce + Timestamp))
/// ```
///
/// The signature concatenates the three parts in exactly that order with no
/// separator; the remote service recomputes it the same way.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// A nonce must never be reused. Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    /// Build the authentication headers for one request.
    ///
    /// The returned bag is meant to be merged into the request's headers; the
    /// signer never touches caller state.
    pub fn sign(&self, cred: &Credential) -> HeaderBag {
        let now = self.time.unwrap_or_else(now);
        let nonce = self.nonce.clone().unwrap_or_else(|| generate_nonce(now));
        let timestamp = format_unix_seconds(now);

        let signature = hex_md5_concat(&[
            cred.secret().as_bytes(),
            nonce.as_bytes(),
            timestamp.as_bytes(),
        ]);

        debug!(
            "signed request for app key {} at timestamp {timestamp}",
            Redact::from(cred.key())
        );

        let mut headers = HeaderBag::new();
        headers.append(APP_KEY, cred.key());
        headers.append(NONCE, nonce);
        headers.append(TIMESTAMP, timestamp);
        headers.append(SIGNATURE, signature);
        headers
    }
}

/// Hash the current time in nanoseconds together with a random value.
fn generate_nonce(now: DateTime) -> String {
    let seed = format!("{}{}", unix_nanos(now), rand::random::<u64>());
    hex_md5(seed.as_bytes())
}
