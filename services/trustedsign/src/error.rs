use std::fmt;

use http::StatusCode;
use serde_json::Value;

/// The kind of a status-derived API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ApiErrorKind {
    /// Bad or expired credential (401).
    Authorization,
    /// Operation not permitted on the resource (405).
    MethodNotAllowed,
    /// Unknown identifier (404).
    ResourceNotFound,
    /// Malformed request payload (400).
    InvalidData,
    /// Wrong `Content-Type` negotiated (415).
    UnsupportedMediaType,
    /// Upstream fault (500, 502, 503, 504).
    Service,
    /// Any other status code.
    Unexpected,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Authorization => write!(f, "authorization"),
            ApiErrorKind::MethodNotAllowed => write!(f, "method not allowed"),
            ApiErrorKind::ResourceNotFound => write!(f, "resource not found"),
            ApiErrorKind::InvalidData => write!(f, "invalid data"),
            ApiErrorKind::UnsupportedMediaType => write!(f, "unsupported media type"),
            ApiErrorKind::Service => write!(f, "service"),
            ApiErrorKind::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// ApiError is a non-success response translated into a typed failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} error (status {}): {message}", .status.as_u16())]
pub struct ApiError {
    kind: ApiErrorKind,
    status: StatusCode,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    /// Create a new error.
    pub fn new(kind: ApiErrorKind, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details.
    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    /// Error kind.
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field level details, only set for [`ApiErrorKind::InvalidData`].
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Whether a caller may retry the request.
    pub fn is_retryable(&self) -> bool {
        self.kind == ApiErrorKind::Service
    }
}

/// Error returned by the trustedsign client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Configuration, transport, encoding or decoding failure.
    #[error(transparent)]
    Core(#[from] trustedsign_core::Error),
}

impl Error {
    /// The API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            Error::Core(_) => None,
        }
    }

    /// The core error, if this is one.
    pub fn as_core(&self) -> Option<&trustedsign_core::Error> {
        match self {
            Error::Core(e) => Some(e),
            Error::Api(_) => None,
        }
    }

    /// Whether the transport could not complete the call.
    pub fn is_transport(&self) -> bool {
        self.as_core().is_some_and(|e| e.is_transport())
    }

    /// Whether a body could not be decoded.
    pub fn is_decode(&self) -> bool {
        self.as_core().is_some_and(|e| e.is_decode())
    }
}

/// Result type for the trustedsign client.
pub type Result<T> = std::result::Result<T, Error>;
