//! Role-based landing routes
//!
//! Role names come from the backend as free text ("HR Manager",
//! "employee", "Staff"), so matching is a case-insensitive substring
//! check rather than an exact comparison. HR keywords are checked
//! first; "HR Manager" must land on the HR home even though it also
//! looks like a manager of employees.

use serde::{Deserialize, Serialize};
use shared::client::UserInfo;

/// Landing route for a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HomeRoute {
    Hr,
    Employee,
}

impl HomeRoute {
    /// Route path for the console router
    pub fn path(&self) -> &'static str {
        match self {
            HomeRoute::Hr => "/hr/home",
            HomeRoute::Employee => "/employee/home",
        }
    }
}

const HR_KEYWORDS: [&str; 3] = ["hr", "admin", "manager"];
const EMPLOYEE_KEYWORDS: [&str; 3] = ["employee", "emp", "staff"];

/// Resolve the landing route for a role name.
///
/// Unknown roles land on the employee home so a role added on the
/// backend never locks its holders out of the console entirely.
pub fn home_for_role(role: &str) -> HomeRoute {
    let role = role.to_lowercase();

    if HR_KEYWORDS.iter().any(|k| role.contains(k)) {
        return HomeRoute::Hr;
    }
    if EMPLOYEE_KEYWORDS.iter().any(|k| role.contains(k)) {
        return HomeRoute::Employee;
    }

    tracing::warn!(role = %role, "Unrecognized role, routing to employee home");
    HomeRoute::Employee
}

/// Landing route for a user record
pub fn home_for_user(user: &UserInfo) -> HomeRoute {
    home_for_role(user.role_name())
}

/// Whether the role grants access to the HR screens
pub fn can_access_hr(role: &str) -> bool {
    home_for_role(role) == HomeRoute::Hr
}
