//! HTTP status mapping
//!
//! Groups codes by the status the backend answers with. The client
//! leans on two of these groups: 401 drives the refresh-and-retry
//! path, and 503 marks transient failures the session check may
//! ignore.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrganizationNotFound
            | Self::CandidateNotFound
            | Self::JobPostingNotFound
            | Self::LeaveNotFound
            | Self::PayslipNotFound
            | Self::EmployeeNotFound
            | Self::RoleNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::OrganizationNameExists
            | Self::OrganizationHasEmployees
            | Self::CandidateAlreadyInvited
            | Self::JobPostingClosed
            | Self::JobPostingTitleExists
            | Self::LeaveAlreadyDecided
            | Self::LeaveOverlap
            | Self::EmployeeEmailExists
            | Self::RoleNameExists => StatusCode::CONFLICT,

            // 401 Unauthorized, the refresh-and-retry trigger
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::SessionExpired
            | Self::RefreshRejected
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::HrRequired
            | Self::EmployeeCannotDeleteSelf => StatusCode::FORBIDDEN,

            // 503 Service Unavailable, transient
            Self::NetworkError
            | Self::TimeoutError
            | Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // Validation and business rule failures
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_group(codes: &[ErrorCode], status: StatusCode) {
        for code in codes {
            assert_eq!(code.http_status(), status, "{code:?}");
        }
    }

    #[test]
    fn test_not_found_group() {
        assert_group(
            &[
                ErrorCode::NotFound,
                ErrorCode::OrganizationNotFound,
                ErrorCode::CandidateNotFound,
                ErrorCode::LeaveNotFound,
                ErrorCode::EmployeeNotFound,
            ],
            StatusCode::NOT_FOUND,
        );
    }

    #[test]
    fn test_conflict_group() {
        assert_group(
            &[
                ErrorCode::AlreadyExists,
                ErrorCode::CandidateAlreadyInvited,
                ErrorCode::JobPostingClosed,
                ErrorCode::LeaveAlreadyDecided,
                ErrorCode::LeaveOverlap,
                ErrorCode::EmployeeEmailExists,
            ],
            StatusCode::CONFLICT,
        );
    }

    #[test]
    fn test_auth_codes_all_answer_401() {
        assert_group(
            &[
                ErrorCode::NotAuthenticated,
                ErrorCode::InvalidCredentials,
                ErrorCode::TokenExpired,
                ErrorCode::TokenInvalid,
                ErrorCode::SessionExpired,
                ErrorCode::RefreshRejected,
                ErrorCode::AccountDisabled,
            ],
            StatusCode::UNAUTHORIZED,
        );
    }

    #[test]
    fn test_permission_group() {
        assert_group(
            &[
                ErrorCode::PermissionDenied,
                ErrorCode::HrRequired,
                ErrorCode::EmployeeCannotDeleteSelf,
            ],
            StatusCode::FORBIDDEN,
        );
    }

    #[test]
    fn test_transient_codes_answer_503() {
        assert_group(
            &[
                ErrorCode::NetworkError,
                ErrorCode::TimeoutError,
                ErrorCode::ServiceUnavailable,
            ],
            StatusCode::SERVICE_UNAVAILABLE,
        );
    }

    #[test]
    fn test_server_faults_answer_500() {
        assert_group(
            &[ErrorCode::InternalError, ErrorCode::ConfigError],
            StatusCode::INTERNAL_SERVER_ERROR,
        );
    }

    #[test]
    fn test_business_rules_default_to_400() {
        assert_group(
            &[
                ErrorCode::ValidationFailed,
                ErrorCode::InvalidRequest,
                ErrorCode::DateRangeInvalid,
                ErrorCode::CandidateStageInvalid,
                ErrorCode::PayrollPeriodInvalid,
            ],
            StatusCode::BAD_REQUEST,
        );
    }

    #[test]
    fn test_success_is_ok() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }
}
