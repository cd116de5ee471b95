//! Heron Client - HTTP client for the HR console backend
//!
//! Session handling (login, logout, refresh, persistence), bearer-token
//! transport with one refresh-and-retry on 401, role-based landing
//! routes and typed wrappers for the resource APIs.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod roles;
pub mod session;
pub mod storage;

pub use client::HeronClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use roles::{can_access_hr, home_for_role, home_for_user, HomeRoute};
pub use session::{SessionData, SessionManager};
pub use storage::{SessionStorage, StorageError};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, SessionTokens, UserInfo};
