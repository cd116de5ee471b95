//! Mock backend state
//!
//! In-memory stores seeded with a small HR data set, plus switches that
//! tests flip to drive a client down specific failure paths. Seed ids are
//! fixed so tests can reference records directly; everything created at
//! runtime gets a snowflake id, which never collides with the seed range.

use shared::models::{
    Candidate, CandidateStage, Employee, EmployeeStatus, JobPosting, LeaveKind, LeaveRequest,
    LeaveStatus, Organization, Payslip, PostingStatus,
};
use shared::util::now_millis;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;

const DAY_MS: i64 = 86_400_000;

/// Which wire shape the login endpoint returns for a given user
///
/// Deployments of the HR backend have shipped all of these over time, so
/// each seeded account is pinned to one shape to keep every client
/// normalization path covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginShape {
    /// `{ "user": {..}, "tokens": { "access": .., "refresh": .. } }`
    Detailed,
    /// `{ "access_token": .., "refresh_token": .., "user": {..} }`
    Split,
    /// `{ "accessToken": .., "refreshToken": .., "user": {..} }` (camelCase gateway)
    SplitCamel,
    /// `{ "token": .. }` only, no refresh token, no inline user
    Bare,
}

/// Seeded login account
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub shape: LoginShape,
}

impl MockUser {
    fn new(
        id: i64,
        username: &str,
        password: &str,
        display_name: &str,
        role: &str,
        shape: LoginShape,
    ) -> Self {
        Self {
            id,
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
            email: format!("{}@heron.test", username),
            role: role.to_string(),
            shape,
        }
    }
}

/// Shared state behind both mock routers
pub struct MockState {
    pub jwt_secret: String,
    pub users: Vec<MockUser>,

    /// Outstanding refresh tokens mapped to user ids
    pub sessions: RwLock<HashMap<String, i64>>,
    /// Access token generation; bumping it invalidates every token issued
    /// under an earlier generation
    pub generation: AtomicU64,

    // Failure switches
    /// Reject every refresh call
    pub fail_refresh: AtomicBool,
    /// Fail the logout endpoint with a 500
    pub fail_logout: AtomicBool,
    /// Refresh succeeds but hands out an already-invalid access token,
    /// reproducing a backend that revoked the session mid-exchange
    pub issue_stale_tokens: AtomicBool,
    /// Rotate the refresh token on every refresh response
    pub rotate_refresh: AtomicBool,

    // Call counters. Incremented before auth so tests can observe retries
    // that arrive with a bad token.
    pub login_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub org_list_calls: AtomicUsize,

    // HR data
    pub organizations: RwLock<Vec<Organization>>,
    pub employees: RwLock<Vec<Employee>>,
    pub candidates: RwLock<Vec<Candidate>>,
    pub job_postings: RwLock<Vec<JobPosting>>,
    pub leave_requests: RwLock<Vec<LeaveRequest>>,
    pub payslips: RwLock<Vec<Payslip>>,
}

impl MockState {
    pub fn new() -> Self {
        let now = now_millis();

        let users = vec![
            MockUser::new(1, "grace", "grace123", "Grace Miller", "HR Manager", LoginShape::Detailed),
            MockUser::new(2, "erin", "erin123", "Erin Novak", "Employee", LoginShape::Split),
            MockUser::new(3, "xenia", "xenia123", "Xenia Petrova", "Auditor", LoginShape::SplitCamel),
            MockUser::new(4, "sam", "sam123", "Sam Okafor", "Staff", LoginShape::Bare),
        ];

        let organizations = vec![
            Organization {
                id: 101,
                name: "Engineering".to_string(),
                description: Some("Product development".to_string()),
                parent_id: None,
                created_at: now - 700 * DAY_MS,
                updated_at: now - 700 * DAY_MS,
            },
            Organization {
                id: 102,
                name: "People Operations".to_string(),
                description: None,
                parent_id: None,
                created_at: now - 700 * DAY_MS,
                updated_at: now - 120 * DAY_MS,
            },
        ];

        let employees = vec![
            Employee {
                id: 201,
                name: "Maria Ionescu".to_string(),
                email: "maria@heron.test".to_string(),
                department: Some("Engineering".to_string()),
                title: Some("Senior Engineer".to_string()),
                organization_id: Some(101),
                status: EmployeeStatus::Active,
                hired_at: now - 600 * DAY_MS,
                created_at: now - 600 * DAY_MS,
                updated_at: now - 600 * DAY_MS,
            },
            Employee {
                id: 202,
                name: "Tom Baker".to_string(),
                email: "tom@heron.test".to_string(),
                department: Some("People Operations".to_string()),
                title: Some("HR Generalist".to_string()),
                organization_id: Some(102),
                status: EmployeeStatus::Active,
                hired_at: now - 420 * DAY_MS,
                created_at: now - 420 * DAY_MS,
                updated_at: now - 30 * DAY_MS,
            },
            Employee {
                id: 203,
                name: "Priya Sharma".to_string(),
                email: "priya@heron.test".to_string(),
                department: Some("Engineering".to_string()),
                title: Some("Engineer".to_string()),
                organization_id: Some(101),
                status: EmployeeStatus::OnLeave,
                hired_at: now - 200 * DAY_MS,
                created_at: now - 200 * DAY_MS,
                updated_at: now - 5 * DAY_MS,
            },
        ];

        let candidates = vec![
            Candidate {
                id: 301,
                name: "Leo Martin".to_string(),
                email: "leo.martin@mail.test".to_string(),
                position: "Backend Engineer".to_string(),
                stage: CandidateStage::Applied,
                invited: false,
                applied_at: now - 12 * DAY_MS,
                updated_at: now - 12 * DAY_MS,
            },
            Candidate {
                id: 302,
                name: "Ana Silva".to_string(),
                email: "ana.silva@mail.test".to_string(),
                position: "Backend Engineer".to_string(),
                stage: CandidateStage::Screening,
                invited: false,
                applied_at: now - 9 * DAY_MS,
                updated_at: now - 4 * DAY_MS,
            },
            Candidate {
                id: 303,
                name: "Kenji Sato".to_string(),
                email: "kenji.sato@mail.test".to_string(),
                position: "HR Generalist".to_string(),
                stage: CandidateStage::Interview,
                invited: true,
                applied_at: now - 20 * DAY_MS,
                updated_at: now - 2 * DAY_MS,
            },
        ];

        let job_postings = vec![
            JobPosting {
                id: 401,
                title: "Backend Engineer".to_string(),
                department: "Engineering".to_string(),
                location: Some("Remote".to_string()),
                description: Some("Rust services and API plumbing".to_string()),
                status: PostingStatus::Open,
                posted_at: Some(now - 25 * DAY_MS),
                created_at: now - 30 * DAY_MS,
                updated_at: now - 25 * DAY_MS,
            },
            JobPosting {
                id: 402,
                title: "HR Generalist".to_string(),
                department: "People Operations".to_string(),
                location: Some("Lisbon".to_string()),
                description: None,
                status: PostingStatus::Draft,
                posted_at: None,
                created_at: now - 3 * DAY_MS,
                updated_at: now - 3 * DAY_MS,
            },
        ];

        let leave_requests = vec![
            LeaveRequest {
                id: 501,
                employee_id: 202,
                employee_name: "Tom Baker".to_string(),
                kind: LeaveKind::Annual,
                start_date: seed_date(2026, 9, 7),
                end_date: seed_date(2026, 9, 11),
                reason: Some("Family trip".to_string()),
                status: LeaveStatus::Pending,
                decided_by: None,
                requested_at: now - 6 * DAY_MS,
                updated_at: now - 6 * DAY_MS,
            },
            LeaveRequest {
                id: 502,
                employee_id: 201,
                employee_name: "Maria Ionescu".to_string(),
                kind: LeaveKind::Sick,
                start_date: seed_date(2026, 8, 3),
                end_date: seed_date(2026, 8, 4),
                reason: None,
                status: LeaveStatus::Approved,
                decided_by: Some(1),
                requested_at: now - 24 * DAY_MS,
                updated_at: now - 23 * DAY_MS,
            },
        ];

        let payslips = vec![
            Payslip {
                id: 601,
                employee_id: 201,
                employee_name: "Maria Ionescu".to_string(),
                period: "2026-06".to_string(),
                gross: 5200.0,
                net: 3510.4,
                currency: "EUR".to_string(),
                issued_at: now - 56 * DAY_MS,
            },
            Payslip {
                id: 602,
                employee_id: 201,
                employee_name: "Maria Ionescu".to_string(),
                period: "2026-07".to_string(),
                gross: 5200.0,
                net: 3510.4,
                currency: "EUR".to_string(),
                issued_at: now - 26 * DAY_MS,
            },
            Payslip {
                id: 603,
                employee_id: 202,
                employee_name: "Tom Baker".to_string(),
                period: "2026-07".to_string(),
                gross: 3900.0,
                net: 2745.1,
                currency: "EUR".to_string(),
                issued_at: now - 26 * DAY_MS,
            },
        ];

        Self {
            jwt_secret: "heron-mock-secret".to_string(),
            users,
            sessions: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
            fail_refresh: AtomicBool::new(false),
            fail_logout: AtomicBool::new(false),
            issue_stale_tokens: AtomicBool::new(false),
            rotate_refresh: AtomicBool::new(true),
            login_calls: AtomicUsize::new(0),
            me_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            org_list_calls: AtomicUsize::new(0),
            organizations: RwLock::new(organizations),
            employees: RwLock::new(employees),
            candidates: RwLock::new(candidates),
            job_postings: RwLock::new(job_postings),
            leave_requests: RwLock::new(leave_requests),
            payslips: RwLock::new(payslips),
        }
    }

    /// Look up a user by credentials
    pub fn find_user(&self, username: &str, password: &str) -> Option<MockUser> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
    }

    pub fn user_by_id(&self, id: i64) -> Option<MockUser> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidate every outstanding access token
    ///
    /// Refresh tokens stay valid, so a client holding one can recover with
    /// a single refresh exchange.
    pub fn expire_access_tokens(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_users_cover_every_login_shape() {
        let state = MockState::new();
        for shape in [
            LoginShape::Detailed,
            LoginShape::Split,
            LoginShape::SplitCamel,
            LoginShape::Bare,
        ] {
            assert!(
                state.users.iter().any(|u| u.shape == shape),
                "no seed user for {:?}",
                shape
            );
        }
    }

    #[test]
    fn test_find_user_checks_password() {
        let state = MockState::new();
        assert!(state.find_user("grace", "grace123").is_some());
        assert!(state.find_user("grace", "wrong").is_none());
        assert!(state.find_user("nobody", "grace123").is_none());
    }

    #[test]
    fn test_expire_bumps_generation() {
        let state = MockState::new();
        assert_eq!(state.current_generation(), 0);
        state.expire_access_tokens();
        state.expire_access_tokens();
        assert_eq!(state.current_generation(), 2);
    }
}
