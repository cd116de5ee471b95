//! Leave requests screen

use heron_client::{ClientError, HeronClient};
use shared::models::{LeaveDecision, LeaveRequest, LeaveStatus};

use crate::app::ConsoleError;
use crate::notify::Notifier;

/// Leave request list state, filtered by status rather than text
pub struct LeaveScreen<'a> {
    client: &'a HeronClient,
    notifier: Notifier,
    items: Vec<LeaveRequest>,
    status_filter: Option<LeaveStatus>,
    error: Option<String>,
}

impl<'a> LeaveScreen<'a> {
    pub fn new(client: &'a HeronClient, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            items: Vec::new(),
            status_filter: None,
            error: None,
        }
    }

    /// Fetch the full list
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        match self.client.leave().list().await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load leave requests", e)),
        }
    }

    pub fn set_status_filter(&mut self, status: Option<LeaveStatus>) {
        self.status_filter = status;
    }

    /// Rows matching the current status filter
    pub fn visible(&self) -> Vec<&LeaveRequest> {
        self.items
            .iter()
            .filter(|r| self.status_filter.is_none_or(|s| r.status == s))
            .collect()
    }

    pub fn items(&self) -> &[LeaveRequest] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Approve a pending request
    pub async fn approve(
        &mut self,
        id: i64,
        note: Option<String>,
    ) -> Result<LeaveRequest, ConsoleError> {
        match self.client.leave().approve(id, &LeaveDecision { note }).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier
                    .success(format!("Approved leave for {}", updated.employee_name));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to approve leave request", e)),
        }
    }

    /// Reject a pending request
    pub async fn reject(
        &mut self,
        id: i64,
        note: Option<String>,
    ) -> Result<LeaveRequest, ConsoleError> {
        match self.client.leave().reject(id, &LeaveDecision { note }).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier
                    .success(format!("Rejected leave for {}", updated.employee_name));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to reject leave request", e)),
        }
    }

    fn patch(&mut self, updated: LeaveRequest) {
        if let Some(row) = self.items.iter_mut().find(|r| r.id == updated.id) {
            *row = updated;
        } else {
            self.items.push(updated);
        }
    }

    fn fail(&mut self, what: &str, e: ClientError) -> ConsoleError {
        let message = format!("{what}: {e}");
        self.error = Some(message.clone());
        self.notifier.error(message);
        e.into()
    }
}
