use std::fmt::{Debug, Formatter};
use std::time::Duration;

use super::constants::*;
use trustedsign_core::{utils::Redact, Context};

/// Config carries all the configuration for the TrustedSign client.
#[derive(Clone)]
pub struct Config {
    /// `app_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TRUSTEDSIGN_APP_KEY`]
    pub app_key: Option<String>,
    /// `app_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TRUSTEDSIGN_APP_SECRET`]
    pub app_secret: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`TRUSTEDSIGN_HOST`]
    /// - default: [`DEFAULT_HOST`]
    pub host: Option<String>,
    /// Use `https://` for API calls. Defaults to true.
    pub use_ssl: bool,
    /// Encode bodies without files as JSON instead of form data. Defaults to true.
    pub use_json: bool,
    /// Timeout for requests without files.
    pub request_timeout: Duration,
    /// Timeout for requests carrying files.
    pub upload_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_key: None,
            app_secret: None,
            host: None,
            use_ssl: true,
            use_json: true,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set app_key
    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Set app_secret
    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into());
        self
    }

    /// Set host, without scheme: `api.trustedsign.com/app`
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set use_ssl
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Set use_json
    pub fn with_json(mut self, use_json: bool) -> Self {
        self.use_json = use_json;
        self
    }

    /// Set request_timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set upload_timeout
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Load config from env. Values already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(TRUSTEDSIGN_APP_KEY) {
            self.app_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(TRUSTEDSIGN_APP_SECRET) {
            self.app_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(TRUSTEDSIGN_HOST) {
            self.host.get_or_insert(v);
        }

        self
    }

    /// Base URL every endpoint is appended to: `https://api.trustedsign.com/app`
    pub fn base_url(&self) -> String {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let host = host.trim_end_matches('/');
        if self.use_ssl {
            format!("https://{host}")
        } else {
            format!("http://{host}")
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_key", &self.app_key.as_ref().map(Redact::from))
            .field("app_secret", &self.app_secret.as_ref().map(Redact::from))
            .field("host", &self.host)
            .field("use_ssl", &self.use_ssl)
            .field("use_json", &self.use_json)
            .field("request_timeout", &self.request_timeout)
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}
