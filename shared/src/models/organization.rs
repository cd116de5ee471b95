//! Organization Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Organization unit entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Parent organization, None for top-level units
    pub parent_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create organization payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrganizationCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
}

/// Update organization payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrganizationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
}
