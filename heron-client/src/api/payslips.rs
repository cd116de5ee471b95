//! Payslip API
//!
//! Payslips are issued by the payroll pipeline; the console only reads
//! them.

use shared::error::ApiResponse;
use shared::models::Payslip;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Payslip endpoints on the core API
pub struct PayslipsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> PayslipsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Payslip>> {
        self.http
            .get::<ApiResponse<Vec<Payslip>>>("api/payslips")
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing payslip list".to_string()))
    }

    pub async fn list_for_employee(&self, employee_id: i64) -> ClientResult<Vec<Payslip>> {
        self.http
            .get::<ApiResponse<Vec<Payslip>>>(&format!("api/payslips?employee_id={}", employee_id))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing payslip list".to_string()))
    }
}
