//! Client error types

use http::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend rejected the request with a structured error code
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session persistence error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Pull a human-readable message out of an error body.
///
/// Backends answer errors in several shapes: the standard envelope
/// (`{"code": .., "message": ".."}`), a bare `{"error": ".."}`, a
/// `{"detail": ".."}` or plain text. The raw body is the fallback.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    body.trim().to_string()
}

/// Map an error response to a `ClientError`.
///
/// 401 always maps to `Unauthorized` so callers can react to expired
/// credentials uniformly. Other statuses prefer the structured envelope
/// code when the body carries one.
pub(crate) fn error_from_response(status: StatusCode, body: String) -> ClientError {
    if status == StatusCode::UNAUTHORIZED {
        return ClientError::Unauthorized;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(code) = value.get("code").and_then(|v| v.as_u64()) {
            if code != 0 {
                let message = value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string();
                return ClientError::Api {
                    code: code as u16,
                    message,
                };
            }
        }
    }

    let message = extract_error_message(&body);
    match status {
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        _ => ClientError::Internal(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_envelope() {
        let body = r#"{"code": 8001, "message": "Employee not found"}"#;
        assert_eq!(extract_error_message(body), "Employee not found");
    }

    #[test]
    fn test_extract_message_from_error_key() {
        let body = r#"{"error": "something broke"}"#;
        assert_eq!(extract_error_message(body), "something broke");
    }

    #[test]
    fn test_extract_message_from_detail_key() {
        let body = r#"{"detail": "not allowed"}"#;
        assert_eq!(extract_error_message(body), "not allowed");
    }

    #[test]
    fn test_extract_message_plain_text() {
        assert_eq!(extract_error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_extract_message_empty_values_skipped() {
        let body = r#"{"message": "", "error": "real reason"}"#;
        assert_eq!(extract_error_message(body), "real reason");
    }

    #[test]
    fn test_error_from_response_unauthorized_wins() {
        // Even a structured body maps to Unauthorized on 401
        let body = r#"{"code": 1003, "message": "Token expired"}"#.to_string();
        let err = error_from_response(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[test]
    fn test_error_from_response_envelope_code() {
        let body = r#"{"code": 4002, "message": "Organization name already exists"}"#.to_string();
        let err = error_from_response(StatusCode::CONFLICT, body);
        match err {
            ClientError::Api { code, message } => {
                assert_eq!(code, 4002);
                assert_eq!(message, "Organization name already exists");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_from_response_status_fallback() {
        let err = error_from_response(StatusCode::NOT_FOUND, "gone".to_string());
        assert!(matches!(err, ClientError::NotFound(msg) if msg == "gone"));

        let err = error_from_response(StatusCode::BAD_REQUEST, "bad".to_string());
        assert!(matches!(err, ClientError::Validation(msg) if msg == "bad"));

        let err = error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "boom"}"#.to_string(),
        );
        assert!(matches!(err, ClientError::Internal(msg) if msg == "boom"));
    }
}
