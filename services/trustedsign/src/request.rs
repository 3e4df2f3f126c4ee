use std::time::Duration;

use http::Method;
use trustedsign_core::HeaderBag;

use crate::body::{Params, UploadFile};

/// OutgoingRequest is one API call before signing and encoding.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// Absolute URL.
    pub url: String,
    /// HTTP method, `GET` by default.
    pub method: Method,
    /// Caller supplied headers.
    pub headers: HeaderBag,
    /// Params, an empty mapping by default. `None` is sent as JSON `null`.
    pub params: Option<Params>,
    /// Files to upload.
    pub files: Vec<(String, UploadFile)>,
    /// Explicit timeout. `None` lets the pipeline pick one.
    pub timeout: Option<Duration>,
}

impl OutgoingRequest {
    /// Create a `GET` request to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            headers: HeaderBag::new(),
            params: Some(Params::new()),
            files: Vec::new(),
            timeout: None,
        }
    }

    /// Set the method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set a header, replacing existing values.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Set params.
    pub fn with_params(mut self, params: Option<Params>) -> Self {
        self.params = params;
        self
    }

    /// Add a file.
    pub fn with_file(mut self, key: impl Into<String>, file: UploadFile) -> Self {
        self.files.push((key.into(), file));
        self
    }

    /// Set an explicit timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Move file-valued params into `files`.
    ///
    /// Afterwards `params` holds no file values.
    pub fn sanitize(&mut self) {
        if let Some(params) = self.params.as_mut() {
            self.files.extend(params.take_files());
        }
    }

    /// Check if the request carries any file.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty() || self.params.as_ref().is_some_and(|p| p.has_files())
    }
}
