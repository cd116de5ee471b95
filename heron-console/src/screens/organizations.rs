//! Organization units screen

use heron_client::{ClientError, HeronClient};
use shared::models::{Organization, OrganizationCreate, OrganizationUpdate};
use validator::Validate;

use crate::app::ConsoleError;
use crate::notify::Notifier;

/// Organization list state
pub struct OrganizationsScreen<'a> {
    client: &'a HeronClient,
    notifier: Notifier,
    items: Vec<Organization>,
    search: String,
    error: Option<String>,
}

impl<'a> OrganizationsScreen<'a> {
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
        match self.client.organizations().list().await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load organizations", e)),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Rows matching the current search
    pub fn visible(&self) -> Vec<&Organization> {
        let needle = self.search.to_lowercase();
        self.items
            .iter()
            .filter(|o| matches_search(o, &needle))
            .collect()
    }

    pub fn items(&self) -> &[Organization] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create a unit and append it to the local list
    pub async fn create(
        &mut self,
        payload: OrganizationCreate,
    ) -> Result<Organization, ConsoleError> {
        if let Err(e) = payload.validate() {
            return Err(self.invalid(e));
        }
        match self.client.organizations().create(&payload).await {
            Ok(created) => {
                self.items.push(created.clone());
                self.error = None;
                self.notifier
                    .success(format!("Created organization {}", created.name));
                Ok(created)
            }
            Err(e) => Err(self.fail("Failed to create organization", e)),
        }
    }

    /// Rename a unit, patching the local row from the response
    pub async fn rename(
        &mut self,
        id: i64,
        name: impl Into<String>,
    ) -> Result<Organization, ConsoleError> {
        let payload = OrganizationUpdate {
            name: Some(name.into()),
            ..Default::default()
        };
        match self.client.organizations().update(id, &payload).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier
                    .success(format!("Renamed organization to {}", updated.name));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to rename organization", e)),
        }
    }

    fn patch(&mut self, updated: Organization) {
        if let Some(row) = self.items.iter_mut().find(|o| o.id == updated.id) {
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

fn matches_search(org: &Organization, needle: &str) -> bool {
    needle.is_empty()
        || org.name.to_lowercase().contains(needle)
        || org
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(name: &str, description: Option<&str>) -> Organization {
        Organization {
            id: 1,
            name: name.to_string(),
            description: description.map(String::from),
            parent_id: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let o = org("Engineering", Some("Product and platform teams"));
        assert!(matches_search(&o, ""));
        assert!(matches_search(&o, "engineer"));
        assert!(matches_search(&o, "platform"));
        assert!(!matches_search(&o, "finance"));
    }

    #[test]
    fn test_search_handles_missing_description() {
        let o = org("People Operations", None);
        assert!(matches_search(&o, "people"));
        assert!(!matches_search(&o, "platform"));
    }
}
