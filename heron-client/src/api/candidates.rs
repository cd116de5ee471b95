//! Candidate API (recruitment service)

use shared::error::ApiResponse;
use shared::models::{Candidate, CandidateCreate, CandidateStage, CandidateUpdate};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Candidate endpoints on the recruitment service
pub struct CandidatesApi<'a> {
    http: &'a HttpClient,
}

impl<'a> CandidatesApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Candidate>> {
        self.http
            .get::<ApiResponse<Vec<Candidate>>>("api/candidates")
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing candidate list".to_string()))
    }

    pub async fn get(&self, id: i64) -> ClientResult<Candidate> {
        self.http
            .get::<ApiResponse<Candidate>>(&format!("api/candidates/{}", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing candidate".to_string()))
    }

    pub async fn create(&self, payload: &CandidateCreate) -> ClientResult<Candidate> {
        self.http
            .post::<ApiResponse<Candidate>, _>("api/candidates", payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing candidate".to_string()))
    }

    pub async fn update(&self, id: i64, payload: &CandidateUpdate) -> ClientResult<Candidate> {
        self.http
            .put::<ApiResponse<Candidate>, _>(&format!("api/candidates/{}", id), payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing candidate".to_string()))
    }

    /// Move a candidate to a pipeline stage
    pub async fn set_stage(&self, id: i64, stage: CandidateStage) -> ClientResult<Candidate> {
        let payload = CandidateUpdate {
            stage: Some(stage),
            ..Default::default()
        };
        self.update(id, &payload).await
    }

    /// Send an interview invitation to a candidate
    pub async fn invite(&self, id: i64) -> ClientResult<Candidate> {
        self.http
            .post_empty::<ApiResponse<Candidate>>(&format!("api/candidates/{}/invite", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing candidate".to_string()))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<ApiResponse<serde_json::Value>>(&format!("api/candidates/{}", id))
            .await?;
        Ok(())
    }
}
