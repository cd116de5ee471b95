//! Error type and response envelope
//!
//! `AppError` carries a stable numeric code plus a human-readable
//! message; `ApiResponse` is the wire envelope every endpoint answers
//! with. The console decides retry and redirect behavior from the code
//! alone, so codes never change meaning between releases.

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error
///
/// Shared by the mock backend (as a handler rejection) and the client
/// (as the decoded body of a failed response).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Field-level errors and other context, serialized as-is
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error carrying the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// HTTP status this error maps to
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Common constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Response envelope
///
/// `code` 0 means success and `data` holds the payload; any other code
/// is a failure and `message`/`details` describe it. `data` is absent
/// rather than null on failures so clients can use `Option` directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Success with a payload
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Failure envelope for an error
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // System-category failures are server bugs, not user input
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_custom_messages() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());

        let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format");
        assert_eq!(err.message, "Invalid email format");
        assert_eq!(format!("{}", err), "Invalid email format");
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "email")
            .with_detail("reason", "required");

        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_constructors_pick_their_codes() {
        let err = AppError::not_found("Employee");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Employee not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));

        assert_eq!(
            AppError::not_authenticated().code,
            ErrorCode::NotAuthenticated
        );
        assert_eq!(
            AppError::invalid_credentials().code,
            ErrorCode::InvalidCredentials
        );
        assert_eq!(AppError::token_expired().code, ErrorCode::TokenExpired);
        assert_eq!(
            AppError::permission_denied("HR only").code,
            ErrorCode::PermissionDenied
        );
        assert_eq!(
            AppError::network("Connection refused").code,
            ErrorCode::NetworkError
        );
        assert_eq!(AppError::internal("boom").code, ErrorCode::InternalError);
    }

    #[test]
    fn test_http_status_follows_code() {
        assert_eq!(
            AppError::new(ErrorCode::NotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::new(ErrorCode::PermissionDenied).http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_envelope_success_and_failure() {
        let response = ApiResponse::success(42);
        assert_eq!(response.code, Some(0));
        assert_eq!(response.data, Some(42));
        assert!(response.details.is_none());

        let response = ApiResponse::<()>::ok();
        assert_eq!(response.code, Some(0));
        assert!(response.data.is_none());

        let err = AppError::with_message(ErrorCode::EmployeeNotFound, "Employee not found")
            .with_detail("id", "123");
        let response = ApiResponse::<()>::error(&err);
        assert_eq!(response.code, Some(8001));
        assert_eq!(response.message, "Employee not found");
        assert!(response.data.is_none());
        assert!(response.details.is_some());
    }

    #[test]
    fn test_envelope_from_error() {
        let response: ApiResponse<String> = AppError::new(ErrorCode::InternalError).into();
        assert_eq!(response.code, Some(9001));
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn test_envelope_wire_shape() {
        let json = serde_json::to_string(&ApiResponse::success("hello")).unwrap();
        assert!(json.contains("\"code\":0"));
        assert!(json.contains("\"data\":\"hello\""));
        // Absent fields are omitted entirely
        assert!(!json.contains("details"));

        let response: ApiResponse<i32> =
            serde_json::from_str(r#"{"code":0,"message":"OK","data":42}"#).unwrap();
        assert_eq!(response.data, Some(42));
    }
}
