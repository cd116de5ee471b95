use crate::state::{LoginShape, MockState, MockUser};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use shared::client::{LoginRequest, LogoutRequest, RefreshRequest};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    Candidate, CandidateCreate, CandidateStage, CandidateUpdate, Employee, EmployeeCreate,
    EmployeeStatus, EmployeeUpdate, JobPosting, JobPostingCreate, JobPostingUpdate, LeaveCreate,
    LeaveDecision, LeaveRequest, LeaveStatus, Organization, OrganizationCreate, OrganizationUpdate,
    Payslip, PostingStatus,
};
use shared::util::{now_millis, snowflake_id};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    /// Access token generation; tokens from an older generation are dead
    ver: u64,
}

fn issue_access_token(state: &MockState, user_id: i64, ver: u64) -> String {
    let expiration = Utc::now()
        .checked_add_signed(Duration::minutes(30))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration as usize,
        ver,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .unwrap_or_default()
}

async fn issue_refresh_token(state: &MockState, user_id: i64) -> String {
    let token = format!("refresh-{}", uuid::Uuid::new_v4());
    state.sessions.write().await.insert(token.clone(), user_id);
    token
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Validate the bearer token and resolve the calling user
fn authenticate(state: &MockState, headers: &HeaderMap) -> Result<MockUser, AppError> {
    let token = bearer_token(headers).ok_or_else(AppError::not_authenticated)?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::token_expired(),
        _ => AppError::invalid_token("Invalid token"),
    })?;

    // Tokens from before a generation bump are expired regardless of exp
    if token_data.claims.ver != state.current_generation() {
        return Err(AppError::token_expired());
    }

    let user_id: i64 = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::invalid_token("Invalid subject claim"))?;

    state
        .user_by_id(user_id)
        .ok_or_else(AppError::not_authenticated)
}

/// Serialize a user the way its backend flavour would
///
/// Detailed backends attach the role as a record, camelCase gateways
/// rename the display name key, everything else is plain snake_case.
fn user_json(user: &MockUser) -> serde_json::Value {
    match user.shape {
        LoginShape::Detailed => serde_json::json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "display_name": user.display_name,
            "role": { "id": user.id, "name": user.role },
        }),
        LoginShape::SplitCamel => serde_json::json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "displayName": user.display_name,
            "role": user.role,
        }),
        LoginShape::Split | LoginShape::Bare => serde_json::json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "display_name": user.display_name,
            "role": user.role,
        }),
    }
}

// ============================================================================
// 认证 API
// ============================================================================

async fn login(
    State(state): State<Arc<MockState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    let Some(user) = state.find_user(&req.username, &req.password) else {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    };

    let access = issue_access_token(&state, user.id, state.current_generation());

    let body = match user.shape {
        LoginShape::Detailed => {
            let refresh = issue_refresh_token(&state, user.id).await;
            serde_json::json!({
                "user": user_json(&user),
                "tokens": { "access": access, "refresh": refresh },
            })
        }
        LoginShape::Split => {
            let refresh = issue_refresh_token(&state, user.id).await;
            serde_json::json!({
                "access_token": access,
                "refresh_token": refresh,
                "user": user_json(&user),
            })
        }
        LoginShape::SplitCamel => {
            let refresh = issue_refresh_token(&state, user.id).await;
            serde_json::json!({
                "accessToken": access,
                "refreshToken": refresh,
                "user": user_json(&user),
            })
        }
        // Legacy single-token backend: no refresh token, no inline user
        LoginShape::Bare => serde_json::json!({ "token": access }),
    };

    tracing::info!(username = %user.username, "Login successful");
    Ok(Json(body))
}

async fn refresh(
    State(state): State<Arc<MockState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    if state.fail_refresh.load(Ordering::SeqCst) {
        return Err(AppError::new(ErrorCode::RefreshRejected));
    }

    let user_id = {
        let sessions = state.sessions.read().await;
        sessions.get(&req.refresh_token).copied()
    };
    let Some(user_id) = user_id else {
        tracing::warn!("Refresh rejected - unknown refresh token");
        return Err(AppError::new(ErrorCode::RefreshRejected));
    };

    // A stale generation reproduces a backend that revoked the session
    // while the exchange was in flight
    let ver = if state.issue_stale_tokens.load(Ordering::SeqCst) {
        state.current_generation().wrapping_sub(1)
    } else {
        state.current_generation()
    };
    let access = issue_access_token(&state, user_id, ver);

    let body = if state.rotate_refresh.load(Ordering::SeqCst) {
        state.sessions.write().await.remove(&req.refresh_token);
        let rotated = issue_refresh_token(&state, user_id).await;
        serde_json::json!({ "access_token": access, "refresh_token": rotated })
    } else {
        serde_json::json!({ "token": access })
    };

    tracing::info!(user_id, "🔄 Refreshed access token");
    Ok(Json(body))
}

/// Logout works with a stale access token; only the refresh token is revoked
async fn logout(
    State(state): State<Arc<MockState>>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);

    if state.fail_logout.load(Ordering::SeqCst) {
        return Err(AppError::internal("Logout backend unavailable"));
    }

    if let Some(token) = req.refresh_token {
        state.sessions.write().await.remove(&token);
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

async fn me(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    let user = authenticate(&state, &headers)?;
    Ok(Json(serde_json::json!({ "user": user_json(&user) })))
}

// ============================================================================
// Organizations
// ============================================================================

async fn list_organizations(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<Organization>>>, AppError> {
    state.org_list_calls.fetch_add(1, Ordering::SeqCst);
    authenticate(&state, &headers)?;
    let organizations = state.organizations.read().await.clone();
    Ok(Json(ApiResponse::success(organizations)))
}

async fn get_organization(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Organization>>, AppError> {
    authenticate(&state, &headers)?;
    let org = state
        .organizations
        .read()
        .await
        .iter()
        .find(|o| o.id == id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;
    Ok(Json(ApiResponse::success(org)))
}

async fn create_organization(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(payload): Json<OrganizationCreate>,
) -> Result<Json<ApiResponse<Organization>>, AppError> {
    authenticate(&state, &headers)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut organizations = state.organizations.write().await;

    if organizations
        .iter()
        .any(|o| o.name.eq_ignore_ascii_case(&payload.name))
    {
        return Err(AppError::new(ErrorCode::OrganizationNameExists));
    }
    if let Some(parent_id) = payload.parent_id {
        if !organizations.iter().any(|o| o.id == parent_id) {
            return Err(AppError::with_message(
                ErrorCode::OrganizationNotFound,
                "Parent organization not found",
            ));
        }
    }

    let now = now_millis();
    let org = Organization {
        id: snowflake_id(),
        name: payload.name,
        description: payload.description,
        parent_id: payload.parent_id,
        created_at: now,
        updated_at: now,
    };
    organizations.push(org.clone());

    tracing::info!(id = org.id, name = %org.name, "Created organization");
    Ok(Json(ApiResponse::success(org)))
}

async fn update_organization(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<OrganizationUpdate>,
) -> Result<Json<ApiResponse<Organization>>, AppError> {
    authenticate(&state, &headers)?;

    let mut organizations = state.organizations.write().await;

    if let Some(name) = &payload.name {
        if organizations
            .iter()
            .any(|o| o.id != id && o.name.eq_ignore_ascii_case(name))
        {
            return Err(AppError::new(ErrorCode::OrganizationNameExists));
        }
    }
    if let Some(parent_id) = payload.parent_id {
        if has_ancestor(&organizations, parent_id, id) {
            return Err(AppError::new(ErrorCode::OrganizationCycle));
        }
        if !organizations.iter().any(|o| o.id == parent_id) {
            return Err(AppError::with_message(
                ErrorCode::OrganizationNotFound,
                "Parent organization not found",
            ));
        }
    }

    let org = organizations
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;

    if let Some(name) = payload.name {
        org.name = name;
    }
    if let Some(description) = payload.description {
        org.description = Some(description);
    }
    if let Some(parent_id) = payload.parent_id {
        org.parent_id = Some(parent_id);
    }
    org.updated_at = now_millis();

    Ok(Json(ApiResponse::success(org.clone())))
}

async fn delete_organization(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authenticate(&state, &headers)?;

    {
        let employees = state.employees.read().await;
        if employees.iter().any(|e| e.organization_id == Some(id)) {
            return Err(AppError::new(ErrorCode::OrganizationHasEmployees));
        }
    }

    let mut organizations = state.organizations.write().await;
    let before = organizations.len();
    organizations.retain(|o| o.id != id);
    if organizations.len() == before {
        return Err(AppError::new(ErrorCode::OrganizationNotFound));
    }

    // Children of the removed unit become top-level, they are not deleted
    for org in organizations.iter_mut() {
        if org.parent_id == Some(id) {
            org.parent_id = None;
        }
    }

    tracing::info!(id, "Deleted organization");
    Ok(Json(ApiResponse::ok()))
}

/// Whether walking up the parent chain from `start` reaches `target`
fn has_ancestor(organizations: &[Organization], start: i64, target: i64) -> bool {
    let mut current = Some(start);
    let mut hops = 0;
    while let Some(id) = current {
        if id == target {
            return true;
        }
        hops += 1;
        if hops > organizations.len() {
            return true;
        }
        current = organizations
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.parent_id);
    }
    false
}

// ============================================================================
// Employees
// ============================================================================

async fn list_employees(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<Employee>>>, AppError> {
    authenticate(&state, &headers)?;
    let employees = state.employees.read().await.clone();
    Ok(Json(ApiResponse::success(employees)))
}

async fn get_employee(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Employee>>, AppError> {
    authenticate(&state, &headers)?;
    let employee = state
        .employees
        .read()
        .await
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    Ok(Json(ApiResponse::success(employee)))
}

async fn create_employee(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(payload): Json<EmployeeCreate>,
) -> Result<Json<ApiResponse<Employee>>, AppError> {
    authenticate(&state, &headers)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut employees = state.employees.write().await;

    if employees
        .iter()
        .any(|e| e.email.eq_ignore_ascii_case(&payload.email))
    {
        return Err(AppError::new(ErrorCode::EmployeeEmailExists));
    }

    let now = now_millis();
    let employee = Employee {
        id: snowflake_id(),
        name: payload.name,
        email: payload.email,
        department: payload.department,
        title: payload.title,
        organization_id: payload.organization_id,
        status: EmployeeStatus::Active,
        hired_at: now,
        created_at: now,
        updated_at: now,
    };
    employees.push(employee.clone());

    tracing::info!(id = employee.id, name = %employee.name, "Created employee");
    Ok(Json(ApiResponse::success(employee)))
}

async fn update_employee(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> Result<Json<ApiResponse<Employee>>, AppError> {
    authenticate(&state, &headers)?;

    let mut employees = state.employees.write().await;

    if let Some(email) = &payload.email {
        if employees
            .iter()
            .any(|e| e.id != id && e.email.eq_ignore_ascii_case(email))
        {
            return Err(AppError::new(ErrorCode::EmployeeEmailExists));
        }
    }

    let employee = employees
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    if let Some(name) = payload.name {
        employee.name = name;
    }
    if let Some(email) = payload.email {
        employee.email = email;
    }
    if let Some(department) = payload.department {
        employee.department = Some(department);
    }
    if let Some(title) = payload.title {
        employee.title = Some(title);
    }
    if let Some(organization_id) = payload.organization_id {
        employee.organization_id = Some(organization_id);
    }
    if let Some(status) = payload.status {
        employee.status = status;
    }
    employee.updated_at = now_millis();

    Ok(Json(ApiResponse::success(employee.clone())))
}

async fn delete_employee(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authenticate(&state, &headers)?;

    let mut employees = state.employees.write().await;
    let before = employees.len();
    employees.retain(|e| e.id != id);
    if employees.len() == before {
        return Err(AppError::new(ErrorCode::EmployeeNotFound));
    }

    tracing::info!(id, "Deleted employee");
    Ok(Json(ApiResponse::ok()))
}

// ============================================================================
// Leave requests
// ============================================================================

async fn list_leave_requests(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<LeaveRequest>>>, AppError> {
    authenticate(&state, &headers)?;
    let leave_requests = state.leave_requests.read().await.clone();
    Ok(Json(ApiResponse::success(leave_requests)))
}

async fn get_leave_request(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LeaveRequest>>, AppError> {
    authenticate(&state, &headers)?;
    let request = state
        .leave_requests
        .read()
        .await
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::LeaveNotFound))?;
    Ok(Json(ApiResponse::success(request)))
}

async fn create_leave_request(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(payload): Json<LeaveCreate>,
) -> Result<Json<ApiResponse<LeaveRequest>>, AppError> {
    authenticate(&state, &headers)?;

    if !payload.date_range_valid() {
        return Err(AppError::new(ErrorCode::DateRangeInvalid));
    }

    let employee_name = {
        let employees = state.employees.read().await;
        employees
            .iter()
            .find(|e| e.id == payload.employee_id)
            .map(|e| e.name.clone())
            .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?
    };

    let mut leave_requests = state.leave_requests.write().await;

    let now = now_millis();
    let request = LeaveRequest {
        id: snowflake_id(),
        employee_id: payload.employee_id,
        employee_name,
        kind: payload.kind,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason,
        status: LeaveStatus::Pending,
        decided_by: None,
        requested_at: now,
        updated_at: now,
    };

    // Rejected requests free up their span
    if leave_requests
        .iter()
        .any(|r| r.status != LeaveStatus::Rejected && r.overlaps(&request))
    {
        return Err(AppError::new(ErrorCode::LeaveOverlap));
    }

    leave_requests.push(request.clone());

    tracing::info!(
        id = request.id,
        employee = %request.employee_name,
        days = request.days(),
        "Created leave request"
    );
    Ok(Json(ApiResponse::success(request)))
}

async fn decide_leave_request(
    state: &MockState,
    headers: &HeaderMap,
    id: i64,
    decision: LeaveDecision,
    status: LeaveStatus,
) -> Result<Json<ApiResponse<LeaveRequest>>, AppError> {
    let user = authenticate(state, headers)?;

    let mut leave_requests = state.leave_requests.write().await;
    let request = leave_requests
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::LeaveNotFound))?;

    if request.status.is_decided() {
        return Err(AppError::new(ErrorCode::LeaveAlreadyDecided));
    }

    request.status = status;
    request.decided_by = Some(user.id);
    request.updated_at = now_millis();

    tracing::info!(
        id,
        status = status.as_str(),
        note = decision.note.as_deref().unwrap_or(""),
        "Leave request decided"
    );
    Ok(Json(ApiResponse::success(request.clone())))
}

async fn approve_leave_request(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(decision): Json<LeaveDecision>,
) -> Result<Json<ApiResponse<LeaveRequest>>, AppError> {
    decide_leave_request(&state, &headers, id, decision, LeaveStatus::Approved).await
}

async fn reject_leave_request(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(decision): Json<LeaveDecision>,
) -> Result<Json<ApiResponse<LeaveRequest>>, AppError> {
    decide_leave_request(&state, &headers, id, decision, LeaveStatus::Rejected).await
}

// ============================================================================
// Payslips (read-only)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PayslipQuery {
    employee_id: Option<i64>,
}

async fn list_payslips(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<PayslipQuery>,
) -> Result<Json<ApiResponse<Vec<Payslip>>>, AppError> {
    authenticate(&state, &headers)?;
    let payslips = state.payslips.read().await;
    let payslips: Vec<Payslip> = payslips
        .iter()
        .filter(|p| query.employee_id.map_or(true, |id| p.employee_id == id))
        .cloned()
        .collect();
    Ok(Json(ApiResponse::success(payslips)))
}

// ============================================================================
// Candidates (recruitment service)
// ============================================================================

async fn list_candidates(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<Candidate>>>, AppError> {
    authenticate(&state, &headers)?;
    let candidates = state.candidates.read().await.clone();
    Ok(Json(ApiResponse::success(candidates)))
}

async fn get_candidate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    authenticate(&state, &headers)?;
    let candidate = state
        .candidates
        .read()
        .await
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::CandidateNotFound))?;
    Ok(Json(ApiResponse::success(candidate)))
}

async fn create_candidate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(payload): Json<CandidateCreate>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    authenticate(&state, &headers)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let now = now_millis();
    let candidate = Candidate {
        id: snowflake_id(),
        name: payload.name,
        email: payload.email,
        position: payload.position,
        stage: CandidateStage::Applied,
        invited: false,
        applied_at: now,
        updated_at: now,
    };
    state.candidates.write().await.push(candidate.clone());

    tracing::info!(id = candidate.id, name = %candidate.name, "Created candidate");
    Ok(Json(ApiResponse::success(candidate)))
}

async fn update_candidate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<CandidateUpdate>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    authenticate(&state, &headers)?;

    let mut candidates = state.candidates.write().await;
    let candidate = candidates
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::CandidateNotFound))?;

    if let Some(stage) = payload.stage {
        // Re-submitting the current stage is a no-op, not a transition
        if stage != candidate.stage && !candidate.stage.can_transition_to(stage) {
            return Err(AppError::new(ErrorCode::CandidateStageInvalid)
                .with_detail("from", candidate.stage.as_str())
                .with_detail("to", stage.as_str()));
        }
        candidate.stage = stage;
    }
    if let Some(name) = payload.name {
        candidate.name = name;
    }
    if let Some(email) = payload.email {
        candidate.email = email;
    }
    if let Some(position) = payload.position {
        candidate.position = position;
    }
    candidate.updated_at = now_millis();

    Ok(Json(ApiResponse::success(candidate.clone())))
}

async fn delete_candidate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authenticate(&state, &headers)?;

    let mut candidates = state.candidates.write().await;
    let before = candidates.len();
    candidates.retain(|c| c.id != id);
    if candidates.len() == before {
        return Err(AppError::new(ErrorCode::CandidateNotFound));
    }

    tracing::info!(id, "Deleted candidate");
    Ok(Json(ApiResponse::ok()))
}

async fn invite_candidate(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    authenticate(&state, &headers)?;

    let mut candidates = state.candidates.write().await;
    let candidate = candidates
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::CandidateNotFound))?;

    if candidate.invited {
        return Err(AppError::new(ErrorCode::CandidateAlreadyInvited));
    }

    candidate.invited = true;
    candidate.updated_at = now_millis();

    tracing::info!(id, name = %candidate.name, "Sent interview invitation");
    Ok(Json(ApiResponse::success(candidate.clone())))
}

// ============================================================================
// Job postings (recruitment service)
// ============================================================================

async fn list_job_postings(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<JobPosting>>>, AppError> {
    authenticate(&state, &headers)?;
    let job_postings = state.job_postings.read().await.clone();
    Ok(Json(ApiResponse::success(job_postings)))
}

async fn get_job_posting(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<JobPosting>>, AppError> {
    authenticate(&state, &headers)?;
    let posting = state
        .job_postings
        .read()
        .await
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::JobPostingNotFound))?;
    Ok(Json(ApiResponse::success(posting)))
}

async fn create_job_posting(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(payload): Json<JobPostingCreate>,
) -> Result<Json<ApiResponse<JobPosting>>, AppError> {
    authenticate(&state, &headers)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let mut job_postings = state.job_postings.write().await;

    if job_postings
        .iter()
        .any(|p| p.title.eq_ignore_ascii_case(&payload.title))
    {
        return Err(AppError::new(ErrorCode::JobPostingTitleExists));
    }

    let now = now_millis();
    let posting = JobPosting {
        id: snowflake_id(),
        title: payload.title,
        department: payload.department,
        location: payload.location,
        description: payload.description,
        status: PostingStatus::Draft,
        posted_at: None,
        created_at: now,
        updated_at: now,
    };
    job_postings.push(posting.clone());

    tracing::info!(id = posting.id, title = %posting.title, "Created job posting");
    Ok(Json(ApiResponse::success(posting)))
}

async fn update_job_posting(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<JobPostingUpdate>,
) -> Result<Json<ApiResponse<JobPosting>>, AppError> {
    authenticate(&state, &headers)?;

    let mut job_postings = state.job_postings.write().await;

    if let Some(title) = &payload.title {
        if job_postings
            .iter()
            .any(|p| p.id != id && p.title.eq_ignore_ascii_case(title))
        {
            return Err(AppError::new(ErrorCode::JobPostingTitleExists));
        }
    }

    let posting = job_postings
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::JobPostingNotFound))?;

    if posting.status == PostingStatus::Closed {
        return Err(AppError::new(ErrorCode::JobPostingClosed));
    }

    if let Some(title) = payload.title {
        posting.title = title;
    }
    if let Some(department) = payload.department {
        posting.department = department;
    }
    if let Some(location) = payload.location {
        posting.location = Some(location);
    }
    if let Some(description) = payload.description {
        posting.description = Some(description);
    }
    if let Some(status) = payload.status {
        if status == PostingStatus::Open && posting.posted_at.is_none() {
            posting.posted_at = Some(now_millis());
        }
        posting.status = status;
    }
    posting.updated_at = now_millis();

    Ok(Json(ApiResponse::success(posting.clone())))
}

async fn delete_job_posting(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    authenticate(&state, &headers)?;

    let mut job_postings = state.job_postings.write().await;
    let before = job_postings.len();
    job_postings.retain(|p| p.id != id);
    if job_postings.len() == before {
        return Err(AppError::new(ErrorCode::JobPostingNotFound));
    }

    tracing::info!(id, "Deleted job posting");
    Ok(Json(ApiResponse::ok()))
}

async fn open_job_posting(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<JobPosting>>, AppError> {
    authenticate(&state, &headers)?;

    let mut job_postings = state.job_postings.write().await;
    let posting = job_postings
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::JobPostingNotFound))?;

    if posting.status == PostingStatus::Closed {
        return Err(AppError::new(ErrorCode::JobPostingClosed));
    }

    // Opening an already open posting is a no-op
    if posting.status == PostingStatus::Draft {
        posting.status = PostingStatus::Open;
        posting.posted_at = Some(now_millis());
        posting.updated_at = now_millis();
        tracing::info!(id, title = %posting.title, "Opened job posting");
    }

    Ok(Json(ApiResponse::success(posting.clone())))
}

async fn close_job_posting(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<JobPosting>>, AppError> {
    authenticate(&state, &headers)?;

    let mut job_postings = state.job_postings.write().await;
    let posting = job_postings
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::JobPostingNotFound))?;

    if posting.status == PostingStatus::Closed {
        return Err(AppError::new(ErrorCode::JobPostingClosed));
    }

    posting.status = PostingStatus::Closed;
    posting.updated_at = now_millis();

    tracing::info!(id, title = %posting.title, "Closed job posting");
    Ok(Json(ApiResponse::success(posting.clone())))
}

// ============================================================================
// Routers
// ============================================================================

/// Core HR backend: auth, organizations, employees, leave, payslips
pub fn core_router(state: Arc<MockState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    // 并发限制：最多 100 个并发请求
    let concurrency_limit = ConcurrencyLimitLayer::new(100);

    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route(
            "/api/organizations",
            get(list_organizations).post(create_organization),
        )
        .route(
            "/api/organizations/{id}",
            get(get_organization)
                .put(update_organization)
                .delete(delete_organization),
        )
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route(
            "/api/leave",
            get(list_leave_requests).post(create_leave_request),
        )
        .route("/api/leave/{id}", get(get_leave_request))
        .route("/api/leave/{id}/approve", post(approve_leave_request))
        .route("/api/leave/{id}/reject", post(reject_leave_request))
        .route("/api/payslips", get(list_payslips))
        .layer(concurrency_limit)
        .with_state(state)
}

/// Recruitment service: candidates and job postings, a separate host in
/// real deployments
pub fn recruitment_router(state: Arc<MockState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    let concurrency_limit = ConcurrencyLimitLayer::new(100);

    Router::new()
        .route("/api/candidates", get(list_candidates).post(create_candidate))
        .route(
            "/api/candidates/{id}",
            get(get_candidate)
                .put(update_candidate)
                .delete(delete_candidate),
        )
        .route("/api/candidates/{id}/invite", post(invite_candidate))
        .route(
            "/api/job-postings",
            get(list_job_postings).post(create_job_posting),
        )
        .route(
            "/api/job-postings/{id}",
            get(get_job_posting)
                .put(update_job_posting)
                .delete(delete_job_posting),
        )
        .route("/api/job-postings/{id}/open", post(open_job_posting))
        .route("/api/job-postings/{id}/close", post(close_job_posting))
        .layer(concurrency_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::client::{RoleRef, UserInfo};

    fn state() -> MockState {
        MockState::new()
    }

    #[test]
    fn test_user_json_parses_for_every_shape() {
        let state = state();
        for user in &state.users {
            let value = user_json(user);
            let parsed: UserInfo =
                serde_json::from_value(value).expect("user_json must deserialize as UserInfo");
            assert_eq!(parsed.id, user.id);
            assert_eq!(parsed.username, user.username);
            assert_eq!(parsed.display_name.as_deref(), Some(user.display_name.as_str()));
            assert_eq!(parsed.role_name(), user.role);
        }
    }

    #[test]
    fn test_detailed_shape_uses_role_record() {
        let state = state();
        let grace = state.find_user("grace", "grace123").unwrap();
        let parsed: UserInfo = serde_json::from_value(user_json(&grace)).unwrap();
        assert!(matches!(parsed.role, Some(RoleRef::Record { .. })));
    }

    #[test]
    fn test_access_token_roundtrip() {
        let state = state();
        let token = issue_access_token(&state, 42, 7);
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "42");
        assert_eq!(data.claims.ver, 7);
    }

    #[test]
    fn test_authenticate_rejects_old_generation() {
        let state = state();
        let token = issue_access_token(&state, 1, state.current_generation());

        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            format!("Bearer {token}").parse().unwrap(),
        );
        assert!(authenticate(&state, &headers).is_ok());

        state.expire_access_tokens();
        let err = authenticate(&state, &headers).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_authenticate_requires_bearer_header() {
        let state = state();
        let headers = HeaderMap::new();
        let err = authenticate(&state, &headers).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic xyz".parse().unwrap());
        let err = authenticate(&state, &headers).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_has_ancestor_walks_chain() {
        let mk = |id, parent_id| Organization {
            id,
            name: format!("org-{id}"),
            description: None,
            parent_id,
            created_at: 0,
            updated_at: 0,
        };
        let orgs = vec![mk(1, None), mk(2, Some(1)), mk(3, Some(2))];

        assert!(has_ancestor(&orgs, 3, 1));
        assert!(has_ancestor(&orgs, 3, 3));
        assert!(!has_ancestor(&orgs, 1, 3));
        assert!(!has_ancestor(&orgs, 2, 3));
    }
}
