// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use http::Method;
use log::debug;
use serde_json::Value;
use trustedsign_core::utils::Redact;
use trustedsign_core::{ApiResponse, Context, ProvideCredential, SigningCredential};

use crate::body::{BodyEncoder, Params};
use crate::classify::ResponseClassifier;
use crate::config::Config;
use crate::constants::*;
use crate::credential::Credential;
use crate::error::Result;
use crate::pipeline::RequestPipeline;
use crate::request::OutgoingRequest;

/// Client talks to the TrustedSign API.
///
/// Every call goes through the [`RequestPipeline`] and the
/// [`ResponseClassifier`], so a returned `Ok` always carries a success status.
#[derive(Debug, Clone)]
pub struct Client {
    pipeline: RequestPipeline,
    classifier: ResponseClassifier,
    base_url: String,
}

impl Client {
    /// Build a client from `config`, filling unset fields from env.
    ///
    /// Fails when the app key or secret is missing, or when TLS is enabled
    /// but the context's transport cannot speak it.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);

        let key = config
            .app_key
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                trustedsign_core::Error::config_invalid(format!(
                    "app key is required, set it in config or env {TRUSTEDSIGN_APP_KEY}"
                ))
            })?;
        let secret = config
            .app_secret
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                trustedsign_core::Error::config_invalid(format!(
                    "app secret is required, set it in config or env {TRUSTEDSIGN_APP_SECRET}"
                ))
            })?;

        Self::build(ctx, &config, Credential::new(key, secret))
    }

    /// Build a client whose credential comes from `provider`.
    pub async fn with_credential_provider(
        ctx: Context,
        config: Config,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let config = config.from_env(&ctx);
        let cred = provider
            .provide_credential(&ctx)
            .await?
            .filter(|c| c.is_valid())
            .ok_or_else(|| {
                trustedsign_core::Error::credential_invalid(
                    "no valid credential found from provider",
                )
            })?;

        Self::build(ctx, &config, cred)
    }

    fn build(ctx: Context, config: &Config, cred: Credential) -> Result<Self> {
        if config.use_ssl && !ctx.http_supports_tls() {
            return Err(trustedsign_core::Error::config_invalid(
                "ssl is enabled but the configured transport has no tls support",
            )
            .into());
        }

        let base_url = config.base_url();
        debug!(
            "built trustedsign client for {base_url} with app key {}",
            Redact::from(cred.key())
        );

        let pipeline = RequestPipeline::new(ctx, cred)
            .with_encoder(BodyEncoder::new(config.use_json))
            .with_request_timeout(config.request_timeout)
            .with_upload_timeout(config.upload_timeout);

        Ok(Self {
            pipeline,
            classifier: ResponseClassifier::new(),
            base_url,
        })
    }

    /// Base URL endpoints are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Send a request and return the classified response.
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<Params>,
    ) -> Result<ApiResponse> {
        let req = OutgoingRequest::new(self.url(endpoint))
            .with_method(method)
            .with_params(params);
        let resp = self.pipeline.send(req).await?;
        self.classifier.classify(resp)
    }

    async fn send_json(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<Params>,
    ) -> Result<Value> {
        let resp = self.send(method, endpoint, params).await?;
        Ok(resp.json()?)
    }

    /// `GET` an endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.send_json(Method::GET, endpoint, Some(Params::new()))
            .await
    }

    /// `POST` params to an endpoint.
    pub async fn post(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.send_json(Method::POST, endpoint, Some(params)).await
    }

    /// `PUT` params to an endpoint.
    pub async fn put(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.send_json(Method::PUT, endpoint, Some(params)).await
    }

    /// `PATCH` params to an endpoint.
    pub async fn patch(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.send_json(Method::PATCH, endpoint, Some(params)).await
    }

    /// `DELETE` an endpoint.
    pub async fn delete(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.send_json(Method::DELETE, endpoint, Some(params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provide_credential::StaticCredentialProvider;
    use trustedsign_core::{ErrorKind, NoopHttpSend, StaticEnv};

    #[test]
    fn test_new_requires_key() {
        let ctx = Context::new().with_env(StaticEnv::default());
        let err = Client::new(ctx, Config::new().with_ssl(false)).unwrap_err();
        let err = err.as_core().unwrap();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.message().contains(TRUSTEDSIGN_APP_KEY));
    }

    #[test]
    fn test_new_requires_secret() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(TRUSTEDSIGN_APP_KEY, "k")]));
        let err = Client::new(ctx, Config::new().with_ssl(false)).unwrap_err();
        assert!(err.as_core().unwrap().message().contains(TRUSTEDSIGN_APP_SECRET));
    }

    #[test]
    fn test_new_rejects_tls_without_support() {
        let ctx = Context::new()
            .with_env(StaticEnv::default())
            .with_http_send(NoopHttpSend);
        let config = Config::new().with_app_key("k").with_app_secret("s");

        let err = Client::new(ctx.clone(), config.clone()).unwrap_err();
        assert_eq!(err.as_core().unwrap().kind(), ErrorKind::ConfigInvalid);

        let client = Client::new(ctx, config.with_ssl(false)).unwrap();
        assert_eq!(client.base_url(), "http://api.trustedsign.com/app");
    }

    #[test]
    fn test_url_join() {
        let ctx = Context::new().with_env(StaticEnv::default());
        let config = Config::new()
            .with_app_key("k")
            .with_app_secret("s")
            .with_ssl(false)
            .with_host("localhost:8080/app/");
        let client = Client::new(ctx, config).unwrap();
        assert_eq!(client.url("/documents"), "http://localhost:8080/app/documents");
        assert_eq!(client.url("documents/1"), "http://localhost:8080/app/documents/1");
    }

    #[tokio::test]
    async fn test_with_credential_provider() {
        let ctx = Context::new().with_env(StaticEnv::default());
        let config = Config::new().with_ssl(false);

        let client = Client::with_credential_provider(
            ctx.clone(),
            config.clone(),
            StaticCredentialProvider::new("app_key", "app_secret"),
        )
        .await
        .unwrap();
        assert_eq!(client.pipeline.credential().key(), "app_key");

        let err = Client::with_credential_provider(
            ctx,
            config,
            StaticCredentialProvider::new("", "app_secret"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.as_core().unwrap().kind(), ErrorKind::CredentialInvalid);
    }
}
