//! Top-level client facade

use crate::api::{
    CandidatesApi, EmployeesApi, JobPostingsApi, LeaveApi, OrganizationsApi, PayslipsApi,
};
use crate::config::ClientConfig;
use crate::http::HttpClient;
use crate::session::SessionManager;

/// Entry point bundling the session with the resource APIs.
///
/// Candidates and job postings live on the recruitment service, which
/// may be a separate host; everything else talks to the core API. Both
/// transports share one session, so a token refreshed for either host
/// serves the other too.
pub struct HeronClient {
    session: SessionManager,
    core: HttpClient,
    recruitment: HttpClient,
}

impl HeronClient {
    /// Build a client and rehydrate any persisted session.
    pub async fn new(config: ClientConfig) -> Self {
        let session = SessionManager::new(&config);
        if let Err(e) = session.restore().await {
            tracing::warn!("Session restore failed: {}", e);
        }

        let core = HttpClient::new(
            config.api_base_url.clone(),
            config.timeout,
            session.clone(),
        );
        let recruitment = HttpClient::new(
            config.recruitment_url().to_string(),
            config.timeout,
            session.clone(),
        );

        Self {
            session,
            core,
            recruitment,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(&self.core)
    }

    pub fn employees(&self) -> EmployeesApi<'_> {
        EmployeesApi::new(&self.core)
    }

    pub fn candidates(&self) -> CandidatesApi<'_> {
        CandidatesApi::new(&self.recruitment)
    }

    pub fn job_postings(&self) -> JobPostingsApi<'_> {
        JobPostingsApi::new(&self.recruitment)
    }

    pub fn leave(&self) -> LeaveApi<'_> {
        LeaveApi::new(&self.core)
    }

    pub fn payslips(&self) -> PayslipsApi<'_> {
        PayslipsApi::new(&self.core)
    }
}
