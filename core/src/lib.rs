//! Core components for talking to the TrustedSign API.
//!
//! This crate provides the foundational types and traits shared by the
//! trustedsign crates. It does not know anything about the service's signing
//! scheme or its error taxonomy; those live in the `trustedsign` crate.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending, file reading, and environment access
//! - **HeaderBag**: An ordered, case-normalized header map with multi-value support
//! - **Traits**: Abstract interfaces for the transport (`HttpSend`) and credential loading (`ProvideCredential`)
//!
//! ## Example
//!
//! ```no_run
//! use trustedsign_core::{ApiResponse, Context, HttpSend, Result, TransportRequest};
//! use async_trait::async_trait;
//! use http::StatusCode;
//!
//! #[derive(Debug)]
//! struct Echo;
//!
//! #[async_trait]
//! impl HttpSend for Echo {
//!     async fn http_send(&self, req: TransportRequest) -> Result<ApiResponse> {
//!         let body = String::from_utf8_lossy(&req.body).to_string();
//!         Ok(ApiResponse::new(StatusCode::OK, body))
//!     }
//! }
//!
//! let ctx = Context::new().with_http_send(Echo);
//! assert!(ctx.http_supports_tls());
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: MD5 hashing used by the request signature
//! - [`time`]: Time helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, NoopFileRead, NoopHttpSend};
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
mod fs;
pub use fs::FileRead;
mod header;
pub use header::{canonical_name, HeaderBag};
mod transport;
pub use transport::{ApiResponse, HttpSend, TransportRequest};

mod api;
pub use api::{ProvideCredential, SigningCredential};
