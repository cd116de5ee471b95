//! Shared types for the Heron HR console
//!
//! Common types used across multiple crates: auth DTOs, HR data models,
//! error codes, response structures, and utility functions.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, SessionTokens, UserInfo};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
