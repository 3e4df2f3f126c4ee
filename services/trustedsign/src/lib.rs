//! TrustedSign API client.
//!
//! Requests are signed with an app key and secret, encoded as JSON, form
//! data or multipart, and the response status is translated into an
//! [`ApiError`] when it is not a success.
//!
//! ## Example
//!
//! ```no_run
//! use trustedsign::{Client, Config, Params};
//! use trustedsign_core::{Context, OsEnv};
//! use trustedsign_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> trustedsign::Result<()> {
//! let ctx = Context::new()
//!     .with_env(OsEnv)
//!     .with_http_send(ReqwestHttpSend::default());
//! let client = Client::new(ctx, Config::new())?;
//!
//! let document = client
//!     .post("/documents", Params::new().with("name", "Service agreement"))
//!     .await?;
//! println!("created {document}");
//! # Ok(())
//! # }
//! ```

mod body;
pub use body::BodyEncoder;
pub use body::EncodedBody;
pub use body::Param;
pub use body::Params;
pub use body::UploadFile;

mod classify;
pub use classify::ResponseClassifier;

mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod error;
pub use error::ApiError;
pub use error::ApiErrorKind;
pub use error::Error;
pub use error::Result;

mod pipeline;
pub use pipeline::RequestPipeline;

mod provide_credential;
pub use provide_credential::*;

mod request;
pub use request::OutgoingRequest;

mod sign_request;
pub use sign_request::RequestSigner;

mod constants;
