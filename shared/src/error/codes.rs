//! Error codes
//!
//! One numeric code per failure the backend can report, grouped by
//! range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Validation errors
//! - 4xxx: Organization errors
//! - 5xxx: Recruitment errors (candidates, with job postings at 51xx)
//! - 6xxx: Leave errors
//! - 7xxx: Payroll errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! Codes travel as bare u16 values in the response envelope, so the
//! console and the backend can be released independently as long as
//! existing numbers keep their meaning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Not an error
    Success = 0,
    /// Anything we could not classify
    Unknown = 1,
    /// Generic missing resource, prefer the per-domain variants
    NotFound = 3,
    /// Generic duplicate, prefer the per-domain variants
    AlreadyExists = 4,
    /// Request was structurally wrong
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// No usable session on the request
    NotAuthenticated = 1001,
    /// Username or password wrong
    InvalidCredentials = 1002,
    /// Access token past its exp claim
    TokenExpired = 1003,
    /// Token failed decoding or signature checks
    TokenInvalid = 1004,
    /// Server-side session gone
    SessionExpired = 1005,
    /// Refresh token unknown or revoked
    RefreshRejected = 1006,
    /// Account exists but may not sign in
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Authenticated but not allowed
    PermissionDenied = 2001,
    /// Endpoint needs a role the user lacks
    RoleRequired = 2002,
    /// Endpoint is HR-only
    HrRequired = 2003,

    // ==================== 3xxx: Validation ====================
    /// Payload failed validation
    ValidationFailed = 3001,
    /// A required field is missing
    RequiredField = 3002,
    /// Value present but malformed
    InvalidFormat = 3003,
    /// Email address malformed
    InvalidEmail = 3004,
    /// End date precedes start date
    DateRangeInvalid = 3005,

    // ==================== 4xxx: Organization ====================
    OrganizationNotFound = 4001,
    /// Unit names are unique, case-insensitive
    OrganizationNameExists = 4002,
    /// Units with assigned employees cannot be deleted
    OrganizationHasEmployees = 4003,
    /// Re-parenting would make the unit its own ancestor
    OrganizationCycle = 4004,

    // ==================== 5xxx: Recruitment ====================
    CandidateNotFound = 5001,
    /// The interview invitation goes out once
    CandidateAlreadyInvited = 5002,
    /// Pipeline stages move one step forward at a time
    CandidateStageInvalid = 5003,
    JobPostingNotFound = 5101,
    /// Closed postings reject all changes
    JobPostingClosed = 5102,
    /// Posting titles are unique, case-insensitive
    JobPostingTitleExists = 5103,

    // ==================== 6xxx: Leave ====================
    LeaveNotFound = 6001,
    /// Approved and rejected requests are final
    LeaveAlreadyDecided = 6002,
    /// Span collides with another request of the same employee
    LeaveOverlap = 6003,

    // ==================== 7xxx: Payroll ====================
    PayslipNotFound = 7001,
    /// Period must be YYYY-MM
    PayrollPeriodInvalid = 7002,

    // ==================== 8xxx: Employee ====================
    EmployeeNotFound = 8001,
    /// Employee emails are unique, case-insensitive
    EmployeeEmailExists = 8002,
    /// Employee exists but is not active
    EmployeeInactive = 8003,
    /// Operators cannot remove their own account
    EmployeeCannotDeleteSelf = 8004,
    RoleNotFound = 8101,
    RoleNameExists = 8102,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    /// Transport-level failure
    NetworkError = 9002,
    /// Upstream did not answer in time
    TimeoutError = 9003,
    /// Server is misconfigured
    ConfigError = 9004,
    /// Backend up but refusing work
    ServiceUnavailable = 9005,
}

impl ErrorCode {
    /// Numeric value on the wire
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default message, used when the handler does not supply one
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::RefreshRejected => "Refresh token was rejected",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::HrRequired => "HR role is required",

            // Validation
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::InvalidEmail => "Invalid email address",
            ErrorCode::DateRangeInvalid => "End date is before start date",

            // Organization
            ErrorCode::OrganizationNotFound => "Organization not found",
            ErrorCode::OrganizationNameExists => "Organization name already exists",
            ErrorCode::OrganizationHasEmployees => "Organization still has employees",
            ErrorCode::OrganizationCycle => "Organization parent chain forms a cycle",

            // Recruitment
            ErrorCode::CandidateNotFound => "Candidate not found",
            ErrorCode::CandidateAlreadyInvited => "Candidate has already been invited",
            ErrorCode::CandidateStageInvalid => "Invalid candidate stage transition",
            ErrorCode::JobPostingNotFound => "Job posting not found",
            ErrorCode::JobPostingClosed => "Job posting is closed",
            ErrorCode::JobPostingTitleExists => "Job posting title already exists",

            // Leave
            ErrorCode::LeaveNotFound => "Leave request not found",
            ErrorCode::LeaveAlreadyDecided => "Leave request has already been decided",
            ErrorCode::LeaveOverlap => "Leave request overlaps an existing one",

            // Payroll
            ErrorCode::PayslipNotFound => "Payslip not found",
            ErrorCode::PayrollPeriodInvalid => "Payroll period is invalid",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",
            ErrorCode::EmployeeInactive => "Employee is inactive",
            ErrorCode::EmployeeCannotDeleteSelf => "Cannot delete own account",
            ErrorCode::RoleNotFound => "Role not found",
            ErrorCode::RoleNameExists => "Role name already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ServiceUnavailable => "Service unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A u16 that matches no known code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),
            1006 => Ok(ErrorCode::RefreshRejected),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::HrRequired),

            // Validation
            3001 => Ok(ErrorCode::ValidationFailed),
            3002 => Ok(ErrorCode::RequiredField),
            3003 => Ok(ErrorCode::InvalidFormat),
            3004 => Ok(ErrorCode::InvalidEmail),
            3005 => Ok(ErrorCode::DateRangeInvalid),

            // Organization
            4001 => Ok(ErrorCode::OrganizationNotFound),
            4002 => Ok(ErrorCode::OrganizationNameExists),
            4003 => Ok(ErrorCode::OrganizationHasEmployees),
            4004 => Ok(ErrorCode::OrganizationCycle),

            // Recruitment
            5001 => Ok(ErrorCode::CandidateNotFound),
            5002 => Ok(ErrorCode::CandidateAlreadyInvited),
            5003 => Ok(ErrorCode::CandidateStageInvalid),
            5101 => Ok(ErrorCode::JobPostingNotFound),
            5102 => Ok(ErrorCode::JobPostingClosed),
            5103 => Ok(ErrorCode::JobPostingTitleExists),

            // Leave
            6001 => Ok(ErrorCode::LeaveNotFound),
            6002 => Ok(ErrorCode::LeaveAlreadyDecided),
            6003 => Ok(ErrorCode::LeaveOverlap),

            // Payroll
            7001 => Ok(ErrorCode::PayslipNotFound),
            7002 => Ok(ErrorCode::PayrollPeriodInvalid),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeEmailExists),
            8003 => Ok(ErrorCode::EmployeeInactive),
            8004 => Ok(ErrorCode::EmployeeCannotDeleteSelf),
            8101 => Ok(ErrorCode::RoleNotFound),
            8102 => Ok(ErrorCode::RoleNameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::ConfigError),
            9005 => Ok(ErrorCode::ServiceUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Wire values the console and the backend both rely on. Changing a
    // number here is a wire format break.
    const PINNED: &[(ErrorCode, u16)] = &[
        (ErrorCode::Success, 0),
        (ErrorCode::Unknown, 1),
        (ErrorCode::NotFound, 3),
        (ErrorCode::AlreadyExists, 4),
        (ErrorCode::InvalidRequest, 5),
        (ErrorCode::NotAuthenticated, 1001),
        (ErrorCode::InvalidCredentials, 1002),
        (ErrorCode::TokenExpired, 1003),
        (ErrorCode::TokenInvalid, 1004),
        (ErrorCode::SessionExpired, 1005),
        (ErrorCode::RefreshRejected, 1006),
        (ErrorCode::AccountDisabled, 1007),
        (ErrorCode::PermissionDenied, 2001),
        (ErrorCode::RoleRequired, 2002),
        (ErrorCode::HrRequired, 2003),
        (ErrorCode::ValidationFailed, 3001),
        (ErrorCode::RequiredField, 3002),
        (ErrorCode::InvalidFormat, 3003),
        (ErrorCode::InvalidEmail, 3004),
        (ErrorCode::DateRangeInvalid, 3005),
        (ErrorCode::OrganizationNotFound, 4001),
        (ErrorCode::OrganizationNameExists, 4002),
        (ErrorCode::OrganizationHasEmployees, 4003),
        (ErrorCode::OrganizationCycle, 4004),
        (ErrorCode::CandidateNotFound, 5001),
        (ErrorCode::CandidateAlreadyInvited, 5002),
        (ErrorCode::CandidateStageInvalid, 5003),
        (ErrorCode::JobPostingNotFound, 5101),
        (ErrorCode::JobPostingClosed, 5102),
        (ErrorCode::JobPostingTitleExists, 5103),
        (ErrorCode::LeaveNotFound, 6001),
        (ErrorCode::LeaveAlreadyDecided, 6002),
        (ErrorCode::LeaveOverlap, 6003),
        (ErrorCode::PayslipNotFound, 7001),
        (ErrorCode::PayrollPeriodInvalid, 7002),
        (ErrorCode::EmployeeNotFound, 8001),
        (ErrorCode::EmployeeEmailExists, 8002),
        (ErrorCode::EmployeeInactive, 8003),
        (ErrorCode::EmployeeCannotDeleteSelf, 8004),
        (ErrorCode::RoleNotFound, 8101),
        (ErrorCode::RoleNameExists, 8102),
        (ErrorCode::InternalError, 9001),
        (ErrorCode::NetworkError, 9002),
        (ErrorCode::TimeoutError, 9003),
        (ErrorCode::ConfigError, 9004),
        (ErrorCode::ServiceUnavailable, 9005),
    ];

    #[test]
    fn test_wire_values_are_pinned() {
        for (code, value) in PINNED {
            assert_eq!(code.code(), *value, "{code:?}");
        }
    }

    #[test]
    fn test_every_pinned_value_parses_back() {
        for (code, value) in PINNED {
            assert_eq!(ErrorCode::try_from(*value), Ok(*code));
        }
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        for value in [2u16, 999, 1234, 5200, 10000, u16::MAX] {
            assert_eq!(ErrorCode::try_from(value), Err(InvalidErrorCode(value)));
        }
        assert_eq!(
            format!("{}", InvalidErrorCode(999)),
            "invalid error code: 999"
        );
    }

    #[test]
    fn test_serde_uses_bare_numbers() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::EmployeeNotFound).unwrap(),
            "8001"
        );
        assert_eq!(
            serde_json::from_str::<ErrorCode>("5101").unwrap(),
            ErrorCode::JobPostingNotFound
        );
        assert!(serde_json::from_str::<ErrorCode>("999").is_err());
    }

    #[test]
    fn test_display_and_default_messages() {
        assert_eq!(format!("{}", ErrorCode::LeaveNotFound), "6001");
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(ErrorCode::EmployeeNotFound.message(), "Employee not found");
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }
}
