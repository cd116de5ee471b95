//! In-process mock server for integration tests
//!
//! Binds the core and recruitment routers to ephemeral ports so tests can
//! point a real client at live HTTP endpoints without fixed port claims.

use crate::api;
use crate::state::MockState;
use std::sync::Arc;

/// Handle to a running pair of mock backends
///
/// The servers live on background tasks for the rest of the test process;
/// dropping the handle does not stop them.
pub struct MockServer {
    pub core_url: String,
    pub recruitment_url: String,
    pub state: Arc<MockState>,
}

impl MockServer {
    /// Spawn both backends with freshly seeded state
    pub async fn spawn() -> Self {
        Self::with_state(Arc::new(MockState::new())).await
    }

    pub async fn with_state(state: Arc<MockState>) -> Self {
        let core = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock core listener");
        let recruitment = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock recruitment listener");

        let core_url = format!("http://{}", core.local_addr().expect("core listener addr"));
        let recruitment_url = format!(
            "http://{}",
            recruitment.local_addr().expect("recruitment listener addr")
        );

        let core_app = api::core_router(state.clone());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(core, core_app).await {
                tracing::error!("Mock core server error: {e}");
            }
        });

        let recruitment_app = api::recruitment_router(state.clone());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(recruitment, recruitment_app).await {
                tracing::error!("Mock recruitment server error: {e}");
            }
        });

        tracing::debug!(core = %core_url, recruitment = %recruitment_url, "Mock backend ready");

        Self {
            core_url,
            recruitment_url,
            state,
        }
    }
}
