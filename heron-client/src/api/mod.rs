//! Resource API surfaces
//!
//! Thin typed wrappers over [`HttpClient`](crate::http::HttpClient).
//! Resource endpoints answer the standard envelope; the wrappers unwrap
//! it and surface a missing `data` field as an invalid response.

pub mod candidates;
pub mod employees;
pub mod job_postings;
pub mod leave;
pub mod organizations;
pub mod payslips;

pub use candidates::CandidatesApi;
pub use employees::EmployeesApi;
pub use job_postings::JobPostingsApi;
pub use leave::LeaveApi;
pub use organizations::OrganizationsApi;
pub use payslips::PayslipsApi;
