//! Candidate Model (招聘)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Recruitment pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStage {
    #[default]
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    /// Whether a candidate may move from this stage to `next`
    ///
    /// The pipeline only moves forward one step at a time; any stage
    /// except the terminal ones may move to Rejected.
    pub fn can_transition_to(&self, next: CandidateStage) -> bool {
        use CandidateStage::*;
        match (self, next) {
            (Applied, Screening) => true,
            (Screening, Interview) => true,
            (Interview, Offer) => true,
            (Offer, Hired) => true,
            (Applied | Screening | Interview | Offer, Rejected) => true,
            _ => false,
        }
    }

    /// Terminal stages cannot change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }
}

/// Candidate record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Position applied for
    pub position: String,
    pub stage: CandidateStage,
    /// Whether an interview invitation has been sent
    #[serde(default)]
    pub invited: bool,
    /// Application timestamp (ms)
    pub applied_at: i64,
    pub updated_at: i64,
}

/// Create candidate payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub position: String,
}

/// Update candidate payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub stage: Option<CandidateStage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_forward_transitions() {
        use CandidateStage::*;
        assert!(Applied.can_transition_to(Screening));
        assert!(Screening.can_transition_to(Interview));
        assert!(Interview.can_transition_to(Offer));
        assert!(Offer.can_transition_to(Hired));
    }

    #[test]
    fn test_stage_rejection_from_any_active_stage() {
        use CandidateStage::*;
        assert!(Applied.can_transition_to(Rejected));
        assert!(Screening.can_transition_to(Rejected));
        assert!(Interview.can_transition_to(Rejected));
        assert!(Offer.can_transition_to(Rejected));
    }

    #[test]
    fn test_stage_no_skipping_or_going_back() {
        use CandidateStage::*;
        assert!(!Applied.can_transition_to(Interview));
        assert!(!Applied.can_transition_to(Hired));
        assert!(!Interview.can_transition_to(Screening));
        assert!(!Offer.can_transition_to(Applied));
    }

    #[test]
    fn test_terminal_stages_are_frozen() {
        use CandidateStage::*;
        assert!(Hired.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(!Hired.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Applied));
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&CandidateStage::Screening).unwrap();
        assert_eq!(json, "\"SCREENING\"");

        let stage: CandidateStage = serde_json::from_str("\"OFFER\"").unwrap();
        assert_eq!(stage, CandidateStage::Offer);
    }
}
