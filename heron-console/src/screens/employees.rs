//! Employees screen

use heron_client::{ClientError, HeronClient};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use validator::Validate;

use crate::app::ConsoleError;
use crate::notify::Notifier;

/// Employee list state
pub struct EmployeesScreen<'a> {
    client: &'a HeronClient,
    notifier: Notifier,
    items: Vec<Employee>,
    search: String,
    error: Option<String>,
}

impl<'a> EmployeesScreen<'a> {
    pub fn new(client: &'a HeronClient, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            items: Vec::new(),
            search: String::new(),
            error: None,
        }
    }

    /// Fetch the full list
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        match self.client.employees().list().await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load employees", e)),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Rows matching the current search, over name, email and department
    pub fn visible(&self) -> Vec<&Employee> {
        let needle = self.search.to_lowercase();
        self.items
            .iter()
            .filter(|e| matches_search(e, &needle))
            .collect()
    }

    pub fn items(&self) -> &[Employee] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create an employee and append the record to the local list
    pub async fn create(&mut self, payload: EmployeeCreate) -> Result<Employee, ConsoleError> {
        if let Err(e) = payload.validate() {
            return Err(self.invalid(e));
        }
        match self.client.employees().create(&payload).await {
            Ok(created) => {
                self.items.push(created.clone());
                self.error = None;
                self.notifier
                    .success(format!("Created employee {}", created.name));
                Ok(created)
            }
            Err(e) => Err(self.fail("Failed to create employee", e)),
        }
    }

    /// Update an employee, patching the local row from the response
    pub async fn update(
        &mut self,
        id: i64,
        payload: EmployeeUpdate,
    ) -> Result<Employee, ConsoleError> {
        match self.client.employees().update(id, &payload).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier
                    .success(format!("Updated employee {}", updated.name));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to update employee", e)),
        }
    }

    fn patch(&mut self, updated: Employee) {
        if let Some(row) = self.items.iter_mut().find(|e| e.id == updated.id) {
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

    fn invalid(&mut self, e: validator::ValidationErrors) -> ConsoleError {
        let message = e.to_string();
        self.error = Some(message.clone());
        ConsoleError::Validation(message)
    }
}

fn matches_search(employee: &Employee, needle: &str) -> bool {
    needle.is_empty()
        || employee.name.to_lowercase().contains(needle)
        || employee.email.to_lowercase().contains(needle)
        || employee
            .department
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::EmployeeStatus;

    fn employee(name: &str, email: &str, department: Option<&str>) -> Employee {
        Employee {
            id: 1,
            name: name.to_string(),
            email: email.to_string(),
            department: department.map(String::from),
            title: None,
            organization_id: None,
            status: EmployeeStatus::Active,
            hired_at: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_search_spans_name_email_department() {
        let e = employee("Maria Ionescu", "maria@heron.test", Some("Engineering"));
        assert!(matches_search(&e, "maria"));
        assert!(matches_search(&e, "@heron"));
        assert!(matches_search(&e, "engineering"));
        assert!(!matches_search(&e, "tom"));
    }
}
