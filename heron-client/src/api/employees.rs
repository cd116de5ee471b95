//! Employee API

use shared::error::ApiResponse;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Employee endpoints on the core API
pub struct EmployeesApi<'a> {
    http: &'a HttpClient,
}

impl<'a> EmployeesApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Employee>> {
        self.http
            .get::<ApiResponse<Vec<Employee>>>("api/employees")
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee list".to_string()))
    }

    pub async fn get(&self, id: i64) -> ClientResult<Employee> {
        self.http
            .get::<ApiResponse<Employee>>(&format!("api/employees/{}", id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee".to_string()))
    }

    pub async fn create(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        self.http
            .post::<ApiResponse<Employee>, _>("api/employees", payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee".to_string()))
    }

    pub async fn update(&self, id: i64, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        self.http
            .put::<ApiResponse<Employee>, _>(&format!("api/employees/{}", id), payload)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee".to_string()))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete::<ApiResponse<serde_json::Value>>(&format!("api/employees/{}", id))
            .await?;
        Ok(())
    }
}
