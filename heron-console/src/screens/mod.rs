//! Feature screens
//!
//! One state container per HR feature: full fetch on load, a local
//! search/filter predicate, and mutations that patch the list from the
//! response instead of refetching. Failures set the page error and
//! emit a toast; validation failures stay inline and never reach HTTP.

pub mod candidates;
pub mod employees;
pub mod job_postings;
pub mod leave;
pub mod organizations;
pub mod payslips;

pub use candidates::CandidatesScreen;
pub use employees::EmployeesScreen;
pub use job_postings::JobPostingsScreen;
pub use leave::LeaveScreen;
pub use organizations::OrganizationsScreen;
pub use payslips::PayslipsScreen;
