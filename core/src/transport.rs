use crate::{Error, HeaderBag, Result};
use bytes::Bytes;
use http::{Method, StatusCode};
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;

/// HttpSend is the transport adapter used by the request pipeline.
///
/// Implementations perform the actual network call and are responsible for
/// enforcing `TransportRequest::timeout`. Any network level failure (DNS,
/// TLS, connect, timeout) must be reported as an [`Error`] of kind
/// [`crate::ErrorKind::Transport`].
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send the request and return the response.
    async fn http_send(&self, req: TransportRequest) -> Result<ApiResponse>;

    /// Whether this transport can talk to `https://` endpoints.
    fn supports_tls(&self) -> bool {
        true
    }
}

/// A fully prepared request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Absolute URL.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Headers with canonical names, one value per name.
    pub headers: Vec<(String, String)>,
    /// Encoded body.
    pub body: Bytes,
    /// Deadline for the whole call.
    pub timeout: Duration,
}

impl TransportRequest {
    /// Get header value by canonical or lower-cased name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response handed back by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Status code.
    pub status: StatusCode,
    /// Body decoded as UTF-8 text.
    pub content: String,
    /// Response headers.
    pub headers: HeaderBag,
}

impl ApiResponse {
    /// Create a response without headers.
    pub fn new(status: StatusCode, content: impl Into<String>) -> Self {
        Self {
            status,
            content: content.into(),
            headers: HeaderBag::new(),
        }
    }

    /// Attach headers.
    pub fn with_headers(mut self, headers: HeaderBag) -> Self {
        self.headers = headers;
        self
    }

    /// Decode the body as JSON.
    ///
    /// An empty body decodes as `null`.
    pub fn json(&self) -> Result<Value> {
        if self.content.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&self.content).map_err(|e| {
            Error::decode(format!(
                "failed to decode response body of status {} as json",
                self.status.as_u16()
            ))
            .with_source(e)
        })
    }
}
