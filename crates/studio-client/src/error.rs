//! Error types for the Studio client
//!
//! Failures are classified structurally (HTTP status, transport kind, service
//! code) so the retry loop never inspects message text:
//! - Transport failures (timeout, connection, request construction)
//! - Workflow invocation failures, split into retryable and fatal
//! - Upload failures

use serde_json::Value;

/// Failure below HTTP: the request never produced a response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Request exceeded its deadline
    #[error("request timed out")]
    Timeout,

    /// Connection or I/O failure
    #[error("network error: {0}")]
    Network(String),

    /// Request could not be built (bad URL, bad header)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Body of a failed HTTP response, parsed when possible
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// Body parsed as JSON
    Json(Value),
    /// Non-JSON body
    Text(String),
    /// No body
    Empty,
}

impl ErrorBody {
    /// Parse a raw response body
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Empty;
        }
        serde_json::from_str(raw).map_or_else(|_| Self::Text(raw.to_string()), Self::Json)
    }

    /// Service error code, if the body carries one
    ///
    /// Looks at `code`, then `error.code`; accepts numbers and numeric strings.
    #[must_use]
    pub fn service_code(&self) -> Option<i64> {
        match self {
            Self::Json(value) => service_code(value),
            Self::Text(_) | Self::Empty => None,
        }
    }

    /// Service-provided message, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Json(value) => service_message(value),
            Self::Text(text) => Some(text.as_str()),
            Self::Empty => None,
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Empty => f.write_str("<empty body>"),
        }
    }
}

/// Extract a service code from a JSON envelope
pub(crate) fn service_code(value: &Value) -> Option<i64> {
    let as_code = |v: &Value| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    value
        .get("code")
        .and_then(as_code)
        .or_else(|| value.get("error").and_then(|e| e.get("code")).and_then(as_code))
}

/// Extract a service message from a JSON envelope
pub(crate) fn service_message(value: &Value) -> Option<&str> {
    value
        .get("msg")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error").and_then(|e| e.get("message")))
        .and_then(Value::as_str)
}

/// Workflow invocation failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvokeError {
    /// Service reports maintenance; never retried
    #[error("service under maintenance (code {code})")]
    Maintenance { code: i64, body: ErrorBody },

    /// Request timed out
    #[error("workflow request timed out")]
    Timeout,

    /// Connection or I/O failure
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("workflow request failed with status {status}: {body}")]
    Http { status: u16, body: ErrorBody },

    /// HTTP success, but the envelope carries a failure code
    #[error("workflow service error {code}: {message}")]
    Service { code: i64, message: String },

    /// Success status with a body that is not JSON
    #[error("malformed workflow response: {0}")]
    MalformedResponse(String),

    /// Request could not be sent
    #[error("invalid workflow request: {0}")]
    InvalidRequest(String),
}

impl InvokeError {
    /// Check if a later attempt might succeed
    ///
    /// Timeouts, network failures and 5xx statuses are transient; everything
    /// else, including maintenance, is terminal for this invocation.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            Self::Maintenance { .. }
            | Self::Service { .. }
            | Self::MalformedResponse(_)
            | Self::InvalidRequest(_) => false,
        }
    }

    /// Check for the service-maintenance marker
    #[inline]
    #[must_use]
    pub fn is_maintenance(&self) -> bool {
        matches!(self, Self::Maintenance { .. })
    }

    /// HTTP status, when the failure carried one
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for InvokeError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => Self::Timeout,
            TransportError::Network(msg) => Self::Network(msg),
            TransportError::InvalidRequest(msg) => Self::InvalidRequest(msg),
        }
    }
}

/// File upload failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    /// Credentials rejected (HTTP 401)
    #[error("upload rejected: invalid or expired api token")]
    Unauthorized,

    /// File rejected as too large (HTTP 413)
    #[error("upload rejected: file too large")]
    PayloadTooLarge,

    /// Other non-success HTTP status
    #[error("upload failed with status {status}: {body}")]
    Http { status: u16, body: ErrorBody },

    /// Request timed out
    #[error("upload timed out")]
    Timeout,

    /// Connection or I/O failure
    #[error("network error during upload: {0}")]
    Network(String),

    /// Success status with a body that is not JSON
    #[error("malformed upload response: {0}")]
    MalformedResponse(String),

    /// Success response without a file identifier
    #[error("upload succeeded but no file id was returned: {body}")]
    MissingFileId { body: ErrorBody },

    /// Local file could not be read
    #[error("cannot read {path}: {message}")]
    ReadFile { path: String, message: String },

    /// Request could not be sent
    #[error("invalid upload request: {0}")]
    InvalidRequest(String),
}

impl UploadError {
    /// Classify a non-success upload status
    #[must_use]
    pub fn from_status(status: u16, body: ErrorBody) -> Self {
        match status {
            401 => Self::Unauthorized,
            413 => Self::PayloadTooLarge,
            _ => Self::Http { status, body },
        }
    }
}

impl From<TransportError> for UploadError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => Self::Timeout,
            TransportError::Network(msg) => Self::Network(msg),
            TransportError::InvalidRequest(msg) => Self::InvalidRequest(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_parsing() {
        assert_eq!(ErrorBody::parse(""), ErrorBody::Empty);
        assert_eq!(ErrorBody::parse("bad gateway"), ErrorBody::Text("bad gateway".into()));
        assert_eq!(ErrorBody::parse(r#"{"code":1}"#), ErrorBody::Json(json!({"code": 1})));
    }

    #[test]
    fn service_code_locations() {
        assert_eq!(ErrorBody::Json(json!({"code": 720702069})).service_code(), Some(720_702_069));
        assert_eq!(ErrorBody::Json(json!({"code": "4100"})).service_code(), Some(4100));
        assert_eq!(
            ErrorBody::Json(json!({"error": {"code": 12, "message": "x"}})).service_code(),
            Some(12)
        );
        assert_eq!(ErrorBody::Text("720702069".into()).service_code(), None);
    }

    #[test]
    fn service_message_locations() {
        assert_eq!(ErrorBody::Json(json!({"msg": "busy"})).message(), Some("busy"));
        assert_eq!(
            ErrorBody::Json(json!({"error": {"message": "nope"}})).message(),
            Some("nope")
        );
    }

    #[test]
    fn invoke_error_is_retryable() {
        assert!(InvokeError::Timeout.is_retryable());
        assert!(InvokeError::Network("reset".into()).is_retryable());
        assert!(InvokeError::Http { status: 503, body: ErrorBody::Empty }.is_retryable());
        assert!(!InvokeError::Http { status: 404, body: ErrorBody::Empty }.is_retryable());
        assert!(!InvokeError::Service { code: 4000, message: "bad".into() }.is_retryable());

        let maintenance = InvokeError::Maintenance { code: 720_702_069, body: ErrorBody::Empty };
        assert!(!maintenance.is_retryable());
        assert!(maintenance.is_maintenance());
    }

    #[test]
    fn upload_status_classification() {
        assert_eq!(UploadError::from_status(401, ErrorBody::Empty), UploadError::Unauthorized);
        assert_eq!(UploadError::from_status(413, ErrorBody::Empty), UploadError::PayloadTooLarge);
        assert!(matches!(
            UploadError::from_status(500, ErrorBody::Empty),
            UploadError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn transport_error_conversion() {
        assert_eq!(InvokeError::from(TransportError::Timeout), InvokeError::Timeout);
        assert_eq!(
            UploadError::from(TransportError::Network("x".into())),
            UploadError::Network("x".into())
        );
    }
}
