//! Command-line surface
//!
//! One subcommand per screen plus the auth commands. Connection flags
//! mirror `AppConfig` and win over the config file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shared::models::{CandidateStage, LeaveStatus};

#[derive(Parser)]
#[command(name = "heron")]
#[command(about = "HR management console", version)]
pub struct Cli {
    /// Core HR API base URL
    #[arg(long, env = "HERON_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Recruitment service base URL (defaults to the core URL)
    #[arg(long, env = "HERON_RECRUITMENT_URL", global = true)]
    pub recruitment_url: Option<String>,

    /// Directory holding the persisted session files
    #[arg(long, env = "HERON_SESSION_DIR", global = true)]
    pub session_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, env = "HERON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level: trace | debug | info | warn | error
    #[arg(long, env = "HERON_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Directory for daily-rolling log files
    #[arg(long, env = "HERON_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and persist the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the role-resolved home route
    Home,
    /// Organization units
    #[command(subcommand)]
    Organizations(OrganizationsCmd),
    /// Employees
    #[command(subcommand)]
    Employees(EmployeesCmd),
    /// Recruitment candidates
    #[command(subcommand)]
    Candidates(CandidatesCmd),
    /// Job postings
    #[command(subcommand, name = "job-postings")]
    JobPostings(JobPostingsCmd),
    /// Leave requests
    #[command(subcommand)]
    Leave(LeaveCmd),
    /// Payslips
    #[command(subcommand)]
    Payslips(PayslipsCmd),
}

#[derive(Subcommand)]
pub enum OrganizationsCmd {
    /// List organization units
    List {
        /// Filter by name or description substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create an organization unit
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Parent unit id
        #[arg(long)]
        parent_id: Option<i64>,
    },
    /// Rename an organization unit
    Rename {
        id: i64,
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand)]
pub enum EmployeesCmd {
    /// List employees
    List {
        /// Filter by name, email or department substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        organization_id: Option<i64>,
    },
    /// Update an employee
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        organization_id: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum CandidatesCmd {
    /// List candidates
    List {
        /// Filter by name, email or position substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a candidate to the pipeline
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        position: String,
    },
    /// Send an interview invitation
    Invite { id: i64 },
    /// Move a candidate to another stage
    Advance {
        id: i64,
        /// applied | screening | interview | offer | hired | rejected
        #[arg(long, value_parser = parse_stage)]
        stage: CandidateStage,
    },
}

#[derive(Subcommand)]
pub enum JobPostingsCmd {
    /// List job postings
    List {
        /// Filter by title, department or location substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a posting (as a draft)
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Publish a draft posting
    Open { id: i64 },
    /// Close a posting
    Close { id: i64 },
}

#[derive(Subcommand)]
pub enum LeaveCmd {
    /// List leave requests
    List {
        /// pending | approved | rejected
        #[arg(long, value_parser = parse_leave_status)]
        status: Option<LeaveStatus>,
    },
    /// Approve a request
    Approve {
        id: i64,
        #[arg(long)]
        note: Option<String>,
    },
    /// Reject a request
    Reject {
        id: i64,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PayslipsCmd {
    /// List payslips
    List {
        /// Payroll period, YYYY-MM
        #[arg(long)]
        period: Option<String>,
        /// Only this employee's slips
        #[arg(long)]
        employee_id: Option<i64>,
    },
}

/// Parse a pipeline stage argument
pub fn parse_stage(s: &str) -> Result<CandidateStage, String> {
    match s.to_lowercase().as_str() {
        "applied" => Ok(CandidateStage::Applied),
        "screening" => Ok(CandidateStage::Screening),
        "interview" => Ok(CandidateStage::Interview),
        "offer" => Ok(CandidateStage::Offer),
        "hired" => Ok(CandidateStage::Hired),
        "rejected" => Ok(CandidateStage::Rejected),
        other => Err(format!("Unknown stage: {other}")),
    }
}

/// Parse a leave status argument
pub fn parse_leave_status(s: &str) -> Result<LeaveStatus, String> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(LeaveStatus::Pending),
        "approved" => Ok(LeaveStatus::Approved),
        "rejected" => Ok(LeaveStatus::Rejected),
        other => Err(format!("Unknown status: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stage() {
        assert_eq!(parse_stage("screening"), Ok(CandidateStage::Screening));
        assert_eq!(parse_stage("OFFER"), Ok(CandidateStage::Offer));
        assert!(parse_stage("fired").is_err());
    }

    #[test]
    fn test_parse_leave_status() {
        assert_eq!(parse_leave_status("Pending"), Ok(LeaveStatus::Pending));
        assert!(parse_leave_status("maybe").is_err());
    }

    #[test]
    fn test_parse_login_command() {
        let cli = Cli::try_parse_from(["heron", "login", "-u", "grace", "-p", "grace123"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Login { ref username, .. } if username == "grace"
        ));
    }

    #[test]
    fn test_parse_screen_command_with_search() {
        let cli = Cli::try_parse_from([
            "heron",
            "organizations",
            "list",
            "--search",
            "engineering",
        ])
        .unwrap();
        match cli.command {
            Command::Organizations(OrganizationsCmd::List { search }) => {
                assert_eq!(search.as_deref(), Some("engineering"));
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_parse_leave_status_flag() {
        let cli =
            Cli::try_parse_from(["heron", "leave", "list", "--status", "pending"]).unwrap();
        match cli.command {
            Command::Leave(LeaveCmd::List { status }) => {
                assert_eq!(status, Some(LeaveStatus::Pending));
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_connection_flags_are_global() {
        let cli = Cli::try_parse_from([
            "heron",
            "whoami",
            "--api-url",
            "http://hr.internal:9000",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://hr.internal:9000"));
    }
}
