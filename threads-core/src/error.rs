use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThreadsApiError {
    /// Transport failure, non-2xx status, or a body that is not JSON.
    #[error("API request to {endpoint} failed")]
    RequestFailed {
        endpoint: String,
        status_code: Option<u16>,
        detail: Option<ApiErrorDetail>,
    },

    #[error("Invalid API response from {endpoint}: {details}")]
    InvalidResponse { endpoint: String, details: String },
}

impl ThreadsApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ThreadsApiError::RequestFailed { endpoint, .. }
            | ThreadsApiError::InvalidResponse { endpoint, .. } => endpoint,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ThreadsApiError::RequestFailed { status_code, .. } => *status_code,
            ThreadsApiError::InvalidResponse { .. } => None,
        }
    }

    pub fn detail(&self) -> Option<&ApiErrorDetail> {
        match self {
            ThreadsApiError::RequestFailed { detail, .. } => detail.as_ref(),
            ThreadsApiError::InvalidResponse { .. } => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ThreadsApiError::RequestFailed { .. } => "THREADS_REQUEST_FAILED",
            ThreadsApiError::InvalidResponse { .. } => "THREADS_INVALID_RESPONSE",
        }
    }
}

/// The `error` object the Graph API puts in a 400 response body. Values are
/// kept as sent; they render as-is, with JSON `null` shown as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    pub code: Option<Value>,
    pub error_subcode: Option<Value>,
}

impl ApiErrorDetail {
    /// Extracts the detail from a response body. `fallback` stands in for a missing
    /// `message`. Returns `None` unless `error` is a non-empty JSON object.
    pub fn from_body(body: &str, fallback: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let error = value.get("error")?.as_object().filter(|obj| !obj.is_empty())?;

        Some(Self {
            message: error
                .get("message")
                .map(|message| Rendered(Some(message)).to_string())
                .unwrap_or_else(|| fallback.to_string()),
            code: error.get("code").cloned(),
            error_subcode: error.get("error_subcode").cloned(),
        })
    }
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API request failed: {} (Code: {}, Subcode: {})",
            self.message,
            Rendered(self.code.as_ref()),
            Rendered(self.error_subcode.as_ref())
        )
    }
}

struct Rendered<'a>(Option<&'a Value>);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None | Some(Value::Null) => f.write_str("None"),
            Some(Value::String(text)) => f.write_str(text),
            Some(other) => write!(f, "{other}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_400_body() {
        let body = r#"{"error":{"message":"Invalid token","code":190,"error_subcode":463}}"#;
        let detail = ApiErrorDetail::from_body(body, "raw").unwrap();

        assert_eq!(detail.message, "Invalid token");
        assert_eq!(detail.code, Some(Value::from(190)));
        assert_eq!(detail.error_subcode, Some(Value::from(463)));
        assert_eq!(
            detail.to_string(),
            "API request failed: Invalid token (Code: 190, Subcode: 463)"
        );
    }

    #[test]
    fn test_detail_missing_fields() {
        let body = r#"{"error":{"type":"OAuthException"}}"#;
        let detail = ApiErrorDetail::from_body(body, "400 Bad Request").unwrap();
        assert_eq!(
            detail.to_string(),
            "API request failed: 400 Bad Request (Code: None, Subcode: None)"
        );
    }

    #[test]
    fn test_detail_keeps_unexpected_value_types() {
        let body = r#"{"error":{"message":{"text":"nested"},"code":"190","error_subcode":null}}"#;
        let detail = ApiErrorDetail::from_body(body, "raw").unwrap();

        assert_eq!(
            detail.to_string(),
            r#"API request failed: {"text":"nested"} (Code: 190, Subcode: None)"#
        );
        assert_eq!(detail.code, Some(Value::from("190")));

        let detail = ApiErrorDetail::from_body(r#"{"error":{"message":null,"code":1.5}}"#, "raw")
            .unwrap();
        assert_eq!(
            detail.to_string(),
            "API request failed: None (Code: 1.5, Subcode: None)"
        );
    }

    #[test]
    fn test_detail_absent() {
        assert!(ApiErrorDetail::from_body("not json", "raw").is_none());
        assert!(ApiErrorDetail::from_body(r#"{"error":{}}"#, "raw").is_none());
        assert!(ApiErrorDetail::from_body(r#"{"error":"nope"}"#, "raw").is_none());
        assert!(ApiErrorDetail::from_body(r#"{"data":[]}"#, "raw").is_none());
    }

    #[test]
    fn test_request_failed_display() {
        let error = ThreadsApiError::RequestFailed {
            endpoint: "https://graph.threads.net/v1.0/me/threads".to_string(),
            status_code: Some(500),
            detail: None,
        };
        assert_eq!(
            error.to_string(),
            "API request to https://graph.threads.net/v1.0/me/threads failed"
        );
        assert_eq!(error.endpoint(), "https://graph.threads.net/v1.0/me/threads");
        assert_eq!(error.status_code(), Some(500));
        assert_eq!(error.error_code(), "THREADS_REQUEST_FAILED");
        assert!(error.detail().is_none());
    }
}
