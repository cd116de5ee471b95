//! Job posting API (recruitment service)

use shared::error::ApiResponse;
use shared::models::{JobPosting, JobPostingCreate, JobPostingUpdate};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Job posting endpoints on the recruitment service
pub struct JobPostingsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> JobPostingsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<JobPosting>> {
        self.http
            .get::<ApiResponse<Vec<JobPosting>>>("api/job-postings")
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing job posting list".to_string()))
    }

    pub async fn get(&self, id: i64) -> ClientResult<JobPosting> {
        self.http
            .get::<ApiResponse<JobPosting>>(&format!("api/job-postings/{}", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing job posting".to_string()))
    }

    pub async fn create(&self, payload: &JobPostingCreate) -> ClientResult<JobPosting> {
        self.http
            .post::<ApiResponse<JobPosting>, _>("api/job-postings", payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing job posting".to_string()))
    }

    pub async fn update(&self, id: i64, payload: &JobPostingUpdate) -> ClientResult<JobPosting> {
        self.http
            .put::<ApiResponse<JobPosting>, _>(&format!("api/job-postings/{}", id), payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing job posting".to_string()))
    }

    /// Open a draft posting for applications
    pub async fn open(&self, id: i64) -> ClientResult<JobPosting> {
        self.http
            .post_empty::<ApiResponse<JobPosting>>(&format!("api/job-postings/{}/open", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing job posting".to_string()))
    }

    /// Close a posting; closed postings reject further changes
    pub async fn close(&self, id: i64) -> ClientResult<JobPosting> {
        self.http
            .post_empty::<ApiResponse<JobPosting>>(&format!("api/job-postings/{}/close", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing job posting".to_string()))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<ApiResponse<serde_json::Value>>(&format!("api/job-postings/{}", id))
            .await?;
        Ok(())
    }
}
