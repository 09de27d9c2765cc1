//! Client-facing error payload.
//!
//! Transport agnostic: the HTTP adapter picks status codes from
//! [`ErrorCode`]. Serialises as `{code, message, traceId?, details?}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DispatchError, TraceId};

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

const PUBLISH_FAILED: &str = "failed to publish transaction";

/// Failure category exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Undecodable body, bad query parameter or negative delay.
    InvalidRequest,
    /// No transaction with the requested id.
    NotFound,
    /// The service or a downstream broker failed.
    InternalError,
}

impl ErrorCode {
    fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "not found",
            Self::InternalError => "internal server error",
        }
    }
}

/// Error payload returned to callers.
///
/// The message is never blank; a blank input falls back to the code's
/// default text. The trace id of the current request is captured on
/// construction.
///
/// # Examples
/// ```
/// use relay::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("transaction 9 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "transaction 9 not found");
/// assert_eq!(Error::invalid_request("  ").message(), "invalid request");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    /// Attach structured context, for example the offending field.
    ///
    /// ```
    /// use relay::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "delay" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "delay" })));
    /// ```
    #[must_use]
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}

/// Client-class failures keep their text; downstream failures collapse to a
/// fixed message and the cause stays in the logs.
impl From<DispatchError> for Error {
    fn from(error: DispatchError) -> Self {
        if error.is_client_error() {
            Self::invalid_request(error.to_string())
        } else {
            Self::internal(PUBLISH_FAILED)
        }
    }
}
