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

//! Reqwest-based transport for trustedsign.
//!
//! This crate provides `ReqwestHttpSend`, the `HttpSend` implementation the
//! request pipeline dispatches through. It applies the per-request timeout
//! chosen by the pipeline and reports every network level failure as a
//! transport error.
//!
//! ## Example
//!
//! ```no_run
//! use trustedsign_core::Context;
//! use trustedsign_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! assert!(ctx.http_supports_tls());
//! ```
//!
//! ## Custom client
//!
//! ```no_run
//! use trustedsign_http_send_reqwest::ReqwestHttpSend;
//! use reqwest::Client;
//!
//! let client = Client::builder()
//!     .user_agent("trustedsign-rs")
//!     .pool_max_idle_per_host(4)
//!     .build()
//!     .unwrap();
//! let transport = ReqwestHttpSend::new(client);
//! ```

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use trustedsign_core::{ApiResponse, Error, HeaderBag, HttpSend, Result, TransportRequest};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: TransportRequest) -> Result<ApiResponse> {
        let TransportRequest {
            url,
            method,
            headers,
            body,
            timeout,
        } = req;

        debug!("sending {method} {url} with timeout {timeout:?}");

        let mut builder = self.client.request(method, &url).timeout(timeout);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        let resp = builder.body(body).send().await.map_err(transport_error)?;

        let status = resp.status();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str(), String::from_utf8_lossy(v.as_bytes()).to_string()))
            .collect::<HeaderBag>();
        let content = resp.text().await.map_err(transport_error)?;

        debug!("received {} from {url}", status.as_u16());
        Ok(ApiResponse {
            status,
            content,
            headers,
        })
    }

    fn supports_tls(&self) -> bool {
        cfg!(any(feature = "rustls-tls", feature = "native-tls"))
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        return Error::request_invalid("failed to build request").with_source(err);
    }

    let message = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "failed to connect"
    } else {
        "failed to send request"
    };

    Error::transport(message).with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Method, StatusCode};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, capture the raw request and reply with `response`.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length")
                                .then(|| v.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn test_http_send_roundtrip() -> anyhow::Result<()> {
        let (url, handle) = serve_once(
            "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\nX-Request-Id: r-1\r\nContent-Length: 8\r\nConnection: close\r\n\r\n{\"id\":1}",
        )
        .await;

        let transport = ReqwestHttpSend::default();
        let resp = transport
            .http_send(TransportRequest {
                url: format!("{url}/documents"),
                method: Method::POST,
                headers: vec![
                    ("App-Key".to_string(), "key".to_string()),
                    ("Content-Type".to_string(), "application/json".to_string()),
                ],
                body: Bytes::from_static(b"{\"name\":\"contract\"}"),
                timeout: Duration::from_secs(5),
            })
            .await?;

        assert_eq!(resp.status, StatusCode::CREATED);
        assert_eq!(resp.content, "{\"id\":1}");
        assert_eq!(resp.headers.get("x-request-id"), Some("r-1"));

        let raw = handle.await?;
        assert!(raw.starts_with("POST /documents HTTP/1.1"));
        assert!(raw.to_ascii_lowercase().contains("app-key: key"));
        assert!(raw.ends_with("{\"name\":\"contract\"}"));
        Ok(())
    }

    #[tokio::test]
    async fn test_http_send_timeout_is_transport_error() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let _server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(stream);
        });

        let err = ReqwestHttpSend::default()
            .http_send(TransportRequest {
                url: format!("http://{addr}/slow"),
                method: Method::GET,
                headers: vec![],
                body: Bytes::new(),
                timeout: Duration::from_millis(100),
            })
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.message(), "request timed out");
        Ok(())
    }

    #[tokio::test]
    async fn test_http_send_connect_failure_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let err = ReqwestHttpSend::default()
            .http_send(TransportRequest {
                url: format!("http://{addr}/"),
                method: Method::GET,
                headers: vec![],
                body: Bytes::new(),
                timeout: Duration::from_secs(2),
            })
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }

    #[test]
    fn test_supports_tls_with_default_features() {
        assert!(ReqwestHttpSend::default().supports_tls());
    }
}
