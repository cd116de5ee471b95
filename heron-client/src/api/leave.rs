//! Leave request API

use shared::error::ApiResponse;
use shared::models::{LeaveCreate, LeaveDecision, LeaveRequest};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Leave request endpoints on the core API
pub struct LeaveApi<'a> {
    http: &'a HttpClient,
}

impl<'a> LeaveApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<LeaveRequest>> {
        self.http
            .get::<ApiResponse<Vec<LeaveRequest>>>("api/leave")
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing leave list".to_string()))
    }

    pub async fn get(&self, id: i64) -> ClientResult<LeaveRequest> {
        self.http
            .get::<ApiResponse<LeaveRequest>>(&format!("api/leave/{}", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing leave request".to_string()))
    }

    pub async fn create(&self, payload: &LeaveCreate) -> ClientResult<LeaveRequest> {
        self.http
            .post::<ApiResponse<LeaveRequest>, _>("api/leave", payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing leave request".to_string()))
    }

    /// Approve a pending request; a decided request rejects the call
    pub async fn approve(&self, id: i64, decision: &LeaveDecision) -> ClientResult<LeaveRequest> {
        self.http
            .post::<ApiResponse<LeaveRequest>, _>(&format!("api/leave/{}/approve", id), decision)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing leave request".to_string()))
    }

    /// Reject a pending request; a decided request rejects the call
    pub async fn reject(&self, id: i64, decision: &LeaveDecision) -> ClientResult<LeaveRequest> {
        self.http
            .post::<ApiResponse<LeaveRequest>, _>(&format!("api/leave/{}/reject", id), decision)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing leave request".to_string()))
    }
}
