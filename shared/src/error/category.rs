//! Error category classification
//!
//! The thousands digit of an [`ErrorCode`] names the domain it belongs
//! to, so clients can group failures (and the server can pick log
//! levels) without matching on every individual code.

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain a code range belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx
    General,
    /// 1xxx
    Auth,
    /// 2xxx
    Permission,
    /// 3xxx
    Validation,
    /// 4xxx
    Organization,
    /// 5xxx, including the 51xx job posting block
    Recruitment,
    /// 6xxx
    Leave,
    /// 7xxx
    Payroll,
    /// 8xxx
    Employee,
    /// 9xxx and anything out of range
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Validation,
            4000..5000 => Self::Organization,
            5000..6000 => Self::Recruitment,
            6000..7000 => Self::Leave,
            7000..8000 => Self::Payroll,
            8000..9000 => Self::Employee,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Validation => "validation",
            Self::Organization => "organization",
            Self::Recruitment => "recruitment",
            Self::Leave => "leave",
            Self::Payroll => "payroll",
            Self::Employee => "employee",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Category of this code's range
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_boundaries() {
        use ErrorCategory::*;
        let cases = [
            (0, General),
            (999, General),
            (1000, Auth),
            (1999, Auth),
            (2001, Permission),
            (3001, Validation),
            (4001, Organization),
            (5001, Recruitment),
            (5101, Recruitment),
            (6001, Leave),
            (7001, Payroll),
            (8001, Employee),
            (8101, Employee),
            (9001, System),
            (10000, System),
        ];
        for (code, expected) in cases {
            assert_eq!(ErrorCategory::from_code(code), expected, "code {code}");
        }
    }

    #[test]
    fn test_codes_land_in_their_domain() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::RefreshRejected.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::PermissionDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::OrganizationNotFound.category(),
            ErrorCategory::Organization
        );
        assert_eq!(
            ErrorCode::CandidateNotFound.category(),
            ErrorCategory::Recruitment
        );
        assert_eq!(
            ErrorCode::JobPostingClosed.category(),
            ErrorCategory::Recruitment
        );
        assert_eq!(ErrorCode::LeaveOverlap.category(), ErrorCategory::Leave);
        assert_eq!(
            ErrorCode::PayslipNotFound.category(),
            ErrorCategory::Payroll
        );
        assert_eq!(ErrorCode::RoleNotFound.category(), ErrorCategory::Employee);
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_names_and_serde_agree() {
        use ErrorCategory::*;
        for category in [
            General,
            Auth,
            Permission,
            Validation,
            Organization,
            Recruitment,
            Leave,
            Payroll,
            Employee,
            System,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
            let back: ErrorCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }
}
