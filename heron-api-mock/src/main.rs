//! Standalone mock HR backend
//!
//! Serves the same routers the integration tests use, on fixed ports, so
//! the console can run against a local backend during development.

use heron_api_mock::state::MockState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heron_api_mock=info,tower_http=info".into()),
        )
        .init();

    let core_addr =
        std::env::var("HERON_MOCK_CORE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let recruitment_addr = std::env::var("HERON_MOCK_RECRUITMENT_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

    let state = Arc::new(MockState::new());

    // The console is a browser app in production, so the mock answers
    // preflight requests too
    let core_app = heron_api_mock::api::core_router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    let recruitment_app = heron_api_mock::api::recruitment_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let core_listener = tokio::net::TcpListener::bind(&core_addr).await?;
    tracing::info!("🚀 Mock HR backend listening on {core_addr}");

    let core_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(core_listener, core_app).await {
            tracing::error!("Core server error: {e}");
        }
    });

    let recruitment_listener = tokio::net::TcpListener::bind(&recruitment_addr).await?;
    tracing::info!("🚀 Mock recruitment service listening on {recruitment_addr}");

    let recruitment_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(recruitment_listener, recruitment_app).await {
            tracing::error!("Recruitment server error: {e}");
        }
    });

    tracing::info!("Seed accounts: grace/grace123 (HR), erin/erin123, xenia/xenia123, sam/sam123");

    core_handle.await?;
    recruitment_handle.await?;

    Ok(())
}
