//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    #[default]
    Active,
    OnLeave,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on leave",
            Self::Terminated => "terminated",
        }
    }
}

/// Employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub title: Option<String>,
    /// Organization unit the employee belongs to
    pub organization_id: Option<i64>,
    pub status: EmployeeStatus,
    /// Hire timestamp (ms)
    pub hired_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub organization_id: Option<i64>,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub organization_id: Option<i64>,
    pub status: Option<EmployeeStatus>,
}
