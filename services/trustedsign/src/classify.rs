use http::StatusCode;
use log::debug;
use serde_json::Value;
use trustedsign_core::ApiResponse;

use crate::error::{ApiError, ApiErrorKind, Result};

/// ResponseClassifier turns a raw response into a success or a typed failure.
///
/// | Status                  | Outcome                                         |
/// |-------------------------|-------------------------------------------------|
/// | 200, 201, 202, 204, 410 | success, response returned unchanged            |
/// | 400                     | `InvalidData`, body's `errors` field as details |
/// | 401                     | `Authorization`, body's `error` field as message|
/// | 404                     | `ResourceNotFound`                              |
/// | 405                     | `MethodNotAllowed`                              |
/// | 415                     | `UnsupportedMediaType`                          |
/// | 500, 502, 503, 504      | `Service`                                       |
/// | anything else           | `Unexpected`                                    |
///
/// A malformed JSON body on a 400 or 401 fails with a decode error instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseClassifier;

impl ResponseClassifier {
    /// Create a classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify `resp`.
    pub fn classify(&self, resp: ApiResponse) -> Result<ApiResponse> {
        let status = resp.status;
        let err = match status.as_u16() {
            200 | 201 | 202 | 204 | 410 => return Ok(resp),
            400 => {
                let body = resp.json()?;
                let details = body.get("errors").filter(|v| !v.is_null()).cloned();
                ApiError::new(ApiErrorKind::InvalidData, status, reason(status))
                    .with_details(details)
            }
            401 => {
                let body = resp.json()?;
                let message = match body.get("error") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => reason(status),
                    Some(v) => v.to_string(),
                };
                ApiError::new(ApiErrorKind::Authorization, status, message)
            }
            404 => ApiError::new(ApiErrorKind::ResourceNotFound, status, reason(status)),
            405 => ApiError::new(ApiErrorKind::MethodNotAllowed, status, reason(status)),
            415 => ApiError::new(ApiErrorKind::UnsupportedMediaType, status, reason(status)),
            500 | 502 | 503 | 504 => ApiError::new(ApiErrorKind::Service, status, reason(status)),
            code => ApiError::new(
                ApiErrorKind::Unexpected,
                status,
                format!("unexpected response status {code}"),
            ),
        };

        debug!("classified response status {} as {}", status.as_u16(), err.kind());
        Err(err.into())
    }
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("status {}", status.as_u16()))
}
