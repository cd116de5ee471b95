//! Client configuration

use std::path::PathBuf;

/// Client configuration for connecting to the HR backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Core HR API base URL (e.g., "http://localhost:8080")
    pub api_base_url: String,

    /// Recruitment service base URL. Candidates and job postings live
    /// on this host; `None` falls back to the core API URL.
    pub recruitment_base_url: Option<String>,

    /// Directory where session tokens and the current user are persisted
    pub session_dir: PathBuf,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            recruitment_base_url: None,
            session_dir: PathBuf::from(".heron/session"),
            timeout: 30,
        }
    }

    /// Set the recruitment service base URL
    pub fn with_recruitment_base_url(mut self, url: impl Into<String>) -> Self {
        self.recruitment_base_url = Some(url.into());
        self
    }

    /// Set the session persistence directory
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Effective recruitment base URL
    pub fn recruitment_url(&self) -> &str {
        self.recruitment_base_url
            .as_deref()
            .unwrap_or(&self.api_base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recruitment_url_falls_back_to_core() {
        let config = ClientConfig::new("http://core:8080");
        assert_eq!(config.recruitment_url(), "http://core:8080");

        let config = config.with_recruitment_base_url("http://recruiting:8081");
        assert_eq!(config.recruitment_url(), "http://recruiting:8081");
    }

    #[test]
    fn test_builder_chain() {
        let config = ClientConfig::default()
            .with_session_dir("/tmp/heron")
            .with_timeout(5);

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.session_dir, PathBuf::from("/tmp/heron"));
        assert_eq!(config.timeout, 5);
    }
}
