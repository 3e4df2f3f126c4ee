use std::time::Duration;

use log::debug;
use trustedsign_core::{ApiResponse, Context, Result, TransportRequest};

use crate::body::BodyEncoder;
use crate::constants::*;
use crate::credential::Credential;
use crate::request::OutgoingRequest;
use crate::sign_request::RequestSigner;

/// RequestPipeline signs, encodes and dispatches one request at a time.
///
/// It holds no mutable state: every call builds its own headers, nonce and
/// body, so a single pipeline can be shared across tasks.
#[derive(Debug, Clone)]
pub struct RequestPipeline {
    ctx: Context,
    credential: Credential,
    signer: RequestSigner,
    encoder: BodyEncoder,
    request_timeout: Duration,
    upload_timeout: Duration,
}

impl RequestPipeline {
    /// Create a pipeline with default encoder and timeouts.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            ctx,
            credential,
            signer: RequestSigner::new(),
            encoder: BodyEncoder::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }

    /// Set the body encoder.
    pub fn with_encoder(mut self, encoder: BodyEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Set the signer.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Timeout used when a request carries no file.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Timeout used when a request carries files.
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// The credential requests are signed with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Sign, encode and send `req`, returning the transport's response as is.
    pub async fn send(&self, mut req: OutgoingRequest) -> Result<ApiResponse> {
        req.sanitize();

        // Caller values must never shadow the signed auth headers.
        let signed = self.signer.sign(&self.credential);
        for (name, _) in signed.iter() {
            req.headers.remove(name);
        }
        req.headers.extend(signed);

        let body = self.encoder.encode(req.params.as_ref(), &req.files)?;
        req.headers.set(CONTENT_TYPE, body.content_type());

        let timeout = req.timeout.unwrap_or(if req.files.is_empty() {
            self.request_timeout
        } else {
            self.upload_timeout
        });

        let transport_req = TransportRequest {
            url: req.url,
            method: req.method,
            headers: req.headers.to_canonical_pairs(),
            body: body.into_bytes(),
            timeout,
        };
        debug!(
            "sending {} {} with timeout {:?}",
            transport_req.method, transport_req.url, transport_req.timeout
        );

        let resp = self.ctx.http_send(transport_req).await?;
        debug!("received response status {}", resp.status.as_u16());
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Params, UploadFile};
    use async_trait::async_trait;
    use http::{Method, StatusCode};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use trustedsign_core::HttpSend;

    #[derive(Debug, Clone, Default)]
    struct Recorder {
        requests: Arc<Mutex<Vec<TransportRequest>>>,
    }

    #[async_trait]
    impl HttpSend for Recorder {
        async fn http_send(&self, req: TransportRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(req);
            Ok(ApiResponse::new(StatusCode::OK, "{}"))
        }
    }

    fn pipeline(recorder: &Recorder) -> RequestPipeline {
        let ctx = Context::new().with_http_send(recorder.clone());
        RequestPipeline::new(ctx, Credential::new("app_key", "app_secret"))
    }

    #[tokio::test]
    async fn test_send_signs_and_encodes() -> anyhow::Result<()> {
        let recorder = Recorder::default();
        let req = OutgoingRequest::new("https://api.trustedsign.com/app/documents")
            .with_method(Method::POST)
            .with_header("content-type", "text/plain")
            .with_header("x-trace", "t-1")
            .with_params(Some(Params::new().with("name", "NDA")));

        let resp = pipeline(&recorder).send(req).await?;
        assert_eq!(resp.status, StatusCode::OK);

        let sent = recorder.requests.lock().unwrap().pop().unwrap();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url, "https://api.trustedsign.com/app/documents");
        assert_eq!(sent.timeout, Duration::from_secs(10));
        assert_eq!(
            sent.headers.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            vec!["Content-Type", "X-Trace", "App-Key", "Nonce", "Timestamp", "Signature"]
        );
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.header("App-Key"), Some("app_key"));
        assert_eq!(sent.body.as_ref(), br#"{"name":"NDA"}"#);
        Ok(())
    }

    #[tokio::test]
    async fn test_caller_auth_headers_are_replaced() -> anyhow::Result<()> {
        use trustedsign_core::hash::hex_md5;

        let recorder = Recorder::default();
        let pipeline = pipeline(&recorder);
        for _ in 0..2 {
            let req = OutgoingRequest::new("https://example.com")
                .with_header("Nonce", "stale")
                .with_header("signature", "forged")
                .with_header("Timestamp", "1")
                .with_header("App-Key", "other");
            pipeline.send(req).await?;
        }

        let sent = recorder.requests.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        for req in &sent {
            for name in ["App-Key", "Nonce", "Timestamp", "Signature"] {
                assert_eq!(req.headers.iter().filter(|(k, _)| k == name).count(), 1);
            }

            let nonce = req.header("Nonce").unwrap();
            let timestamp = req.header("Timestamp").unwrap();
            assert_ne!(nonce, "stale");
            assert_ne!(timestamp, "1");
            assert_eq!(req.header("App-Key"), Some("app_key"));
            assert_eq!(
                req.header("Signature").unwrap(),
                hex_md5(format!("app_secret{nonce}{timestamp}").as_bytes())
            );
        }
        assert_ne!(sent[0].header("Nonce"), sent[1].header("Nonce"));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_with_files_uses_upload_timeout() -> anyhow::Result<()> {
        let recorder = Recorder::default();
        let req = OutgoingRequest::new("https://example.com/upload")
            .with_method(Method::POST)
            .with_params(Some(
                Params::new().with_file("document", UploadFile::new("a.pdf", "pdf")),
            ));

        pipeline(&recorder).send(req).await?;

        let sent = recorder.requests.lock().unwrap().pop().unwrap();
        assert_eq!(sent.timeout, Duration::from_secs(120));
        assert!(sent
            .header("Content-Type")
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
        Ok(())
    }

    #[tokio::test]
    async fn test_explicit_timeout_wins() -> anyhow::Result<()> {
        let recorder = Recorder::default();
        let req = OutgoingRequest::new("https://example.com").with_timeout(Duration::from_secs(3));

        pipeline(&recorder)
            .with_request_timeout(Duration::from_secs(30))
            .send(req)
            .await?;

        let sent = recorder.requests.lock().unwrap().pop().unwrap();
        assert_eq!(sent.timeout, Duration::from_secs(3));
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let ctx = Context::new();
        let pipeline = RequestPipeline::new(ctx, Credential::new("k", "s"));

        let err = pipeline
            .send(OutgoingRequest::new("https://example.com"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
