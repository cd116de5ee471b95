//! Job Posting Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Job posting status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostingStatus {
    #[default]
    Draft,
    Open,
    Closed,
}

impl PostingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Job posting record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: PostingStatus,
    /// Publication timestamp (ms), set when the posting is opened
    pub posted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create job posting payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobPostingCreate {
    #[validate(length(min = 1, max = 160))]
    pub title: String,
    #[validate(length(min = 1))]
    pub department: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Update job posting payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JobPostingUpdate {
    pub title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<PostingStatus>,
}
