//! Job postings screen (served by the recruitment host)

use heron_client::{ClientError, HeronClient};
use shared::models::{JobPosting, JobPostingCreate};
use validator::Validate;

use crate::app::ConsoleError;
use crate::notify::Notifier;

/// Job posting list state
pub struct JobPostingsScreen<'a> {
    client: &'a HeronClient,
    notifier: Notifier,
    items: Vec<JobPosting>,
    search: String,
    error: Option<String>,
}

impl<'a> JobPostingsScreen<'a> {
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
        match self.client.job_postings().list().await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load job postings", e)),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Rows matching the current search, over title, department and location
    pub fn visible(&self) -> Vec<&JobPosting> {
        let needle = self.search.to_lowercase();
        self.items
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.department.to_lowercase().contains(&needle)
                    || p
                        .location
                        .as_ref()
                        .is_some_and(|l| l.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn items(&self) -> &[JobPosting] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create a draft posting
    pub async fn post(&mut self, payload: JobPostingCreate) -> Result<JobPosting, ConsoleError> {
        if let Err(e) = payload.validate() {
            return Err(self.invalid(e));
        }
        match self.client.job_postings().create(&payload).await {
            Ok(created) => {
                self.items.push(created.clone());
                self.error = None;
                self.notifier
                    .success(format!("Posted {} as a draft", created.title));
                Ok(created)
            }
            Err(e) => Err(self.fail("Failed to create job posting", e)),
        }
    }

    /// Publish a draft posting
    pub async fn open(&mut self, id: i64) -> Result<JobPosting, ConsoleError> {
        match self.client.job_postings().open(id).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier.success(format!("Opened {}", updated.title));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to open job posting", e)),
        }
    }

    /// Close a posting
    pub async fn close(&mut self, id: i64) -> Result<JobPosting, ConsoleError> {
        match self.client.job_postings().close(id).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier.success(format!("Closed {}", updated.title));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to close job posting", e)),
        }
    }

    fn patch(&mut self, updated: JobPosting) {
        if let Some(row) = self.items.iter_mut().find(|p| p.id == updated.id) {
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
