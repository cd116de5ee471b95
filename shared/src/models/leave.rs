//! Leave Request Model (请假)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Leave kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveKind {
    #[default]
    Annual,
    Sick,
    Unpaid,
    Parental,
}

impl LeaveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Sick => "sick",
            Self::Unpaid => "unpaid",
            Self::Parental => "parental",
        }
    }
}

/// Leave request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Decided requests cannot change again
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Leave request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    /// Employee display name (denormalized for list views)
    pub employee_name: String,
    pub kind: LeaveKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    /// User who approved or rejected the request
    pub decided_by: Option<i64>,
    pub requested_at: i64,
    pub updated_at: i64,
}

impl LeaveRequest {
    /// Inclusive day count of the leave span
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether this request's span overlaps another's
    pub fn overlaps(&self, other: &LeaveRequest) -> bool {
        self.employee_id == other.employee_id
            && self.start_date <= other.end_date
            && other.start_date <= self.end_date
    }
}

/// Create leave request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCreate {
    pub employee_id: i64,
    pub kind: LeaveKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

impl LeaveCreate {
    /// End date must not precede start date
    pub fn date_range_valid(&self) -> bool {
        self.start_date <= self.end_date
    }
}

/// Approve/reject payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeaveDecision {
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leave(employee_id: i64, start: &str, end: &str) -> LeaveRequest {
        LeaveRequest {
            id: 1,
            employee_id,
            employee_name: "Test".to_string(),
            kind: LeaveKind::Annual,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            reason: None,
            status: LeaveStatus::Pending,
            decided_by: None,
            requested_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_days_inclusive() {
        assert_eq!(leave(1, "2025-03-10", "2025-03-10").days(), 1);
        assert_eq!(leave(1, "2025-03-10", "2025-03-14").days(), 5);
    }

    #[test]
    fn test_overlap_same_employee() {
        let a = leave(1, "2025-03-10", "2025-03-14");
        let b = leave(1, "2025-03-14", "2025-03-20");
        let c = leave(1, "2025-03-15", "2025-03-20");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_no_overlap_across_employees() {
        let a = leave(1, "2025-03-10", "2025-03-14");
        let b = leave(2, "2025-03-10", "2025-03-14");
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_date_range_valid() {
        let ok = LeaveCreate {
            employee_id: 1,
            kind: LeaveKind::Sick,
            start_date: "2025-04-01".parse().unwrap(),
            end_date: "2025-04-02".parse().unwrap(),
            reason: None,
        };
        assert!(ok.date_range_valid());

        let bad = LeaveCreate {
            end_date: "2025-03-31".parse().unwrap(),
            ..ok
        };
        assert!(!bad.date_range_valid());
    }

    #[test]
    fn test_status_is_decided() {
        assert!(!LeaveStatus::Pending.is_decided());
        assert!(LeaveStatus::Approved.is_decided());
        assert!(LeaveStatus::Rejected.is_decided());
    }
}
