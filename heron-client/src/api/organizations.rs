//! Organization API

use shared::error::ApiResponse;
use shared::models::{Organization, OrganizationCreate, OrganizationUpdate};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Organization endpoints on the core API
pub struct OrganizationsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> OrganizationsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Organization>> {
        self.http
            .get::<ApiResponse<Vec<Organization>>>("api/organizations")
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing organization list".to_string()))
    }

    pub async fn get(&self, id: i64) -> ClientResult<Organization> {
        self.http
            .get::<ApiResponse<Organization>>(&format!("api/organizations/{}", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing organization".to_string()))
    }

    pub async fn create(&self, payload: &OrganizationCreate) -> ClientResult<Organization> {
        self.http
            .post::<ApiResponse<Organization>, _>("api/organizations", payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing organization".to_string()))
    }

    pub async fn update(&self, id: i64, payload: &OrganizationUpdate) -> ClientResult<Organization> {
        self.http
            .put::<ApiResponse<Organization>, _>(&format!("api/organizations/{}", id), payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing organization".to_string()))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<ApiResponse<serde_json::Value>>(&format!("api/organizations/{}", id))
            .await?;
        Ok(())
    }
}
