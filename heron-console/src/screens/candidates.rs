//! Recruitment candidates screen (served by the recruitment host)

use heron_client::{ClientError, HeronClient};
use shared::models::{Candidate, CandidateCreate, CandidateStage};
use validator::Validate;

use crate::app::ConsoleError;
use crate::notify::Notifier;

/// Candidate pipeline state
pub struct CandidatesScreen<'a> {
    client: &'a HeronClient,
    notifier: Notifier,
    items: Vec<Candidate>,
    search: String,
    error: Option<String>,
}

impl<'a> CandidatesScreen<'a> {
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
        match self.client.candidates().list().await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load candidates", e)),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Rows matching the current search, over name, email and position
    pub fn visible(&self) -> Vec<&Candidate> {
        let needle = self.search.to_lowercase();
        self.items
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
                    || c.position.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Add a candidate to the pipeline
    pub async fn add(&mut self, payload: CandidateCreate) -> Result<Candidate, ConsoleError> {
        if let Err(e) = payload.validate() {
            return Err(self.invalid(e));
        }
        match self.client.candidates().create(&payload).await {
            Ok(created) => {
                self.items.push(created.clone());
                self.error = None;
                self.notifier
                    .success(format!("Added candidate {}", created.name));
                Ok(created)
            }
            Err(e) => Err(self.fail("Failed to add candidate", e)),
        }
    }

    /// Send an interview invitation
    pub async fn invite(&mut self, id: i64) -> Result<Candidate, ConsoleError> {
        match self.client.candidates().invite(id).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier
                    .success(format!("Invited {} to interview", updated.name));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to invite candidate", e)),
        }
    }

    /// Move a candidate to another pipeline stage
    pub async fn advance(
        &mut self,
        id: i64,
        stage: CandidateStage,
    ) -> Result<Candidate, ConsoleError> {
        match self.client.candidates().set_stage(id, stage).await {
            Ok(updated) => {
                self.patch(updated.clone());
                self.error = None;
                self.notifier.success(format!(
                    "Moved {} to {}",
                    updated.name,
                    updated.stage.as_str()
                ));
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to move candidate", e)),
        }
    }

    fn patch(&mut self, updated: Candidate) {
        if let Some(row) = self.items.iter_mut().find(|c| c.id == updated.id) {
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
