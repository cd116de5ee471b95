//! Data models
//!
//! Shared between the HR backend and the console (via API).
//! All IDs are `i64` snowflakes assigned by the backend (JS-safe range).

pub mod candidate;
pub mod employee;
pub mod job_posting;
pub mod leave;
pub mod organization;
pub mod payslip;

// Re-exports
pub use candidate::*;
pub use employee::*;
pub use job_posting::*;
pub use leave::*;
pub use organization::*;
pub use payslip::*;
