//! Boundary to the remote text-analysis capability.
//!
//! The gateway either returns a value that strictly conforms to the declared
//! result shape or fails. Implementations report missing credentials as
//! [`CommsError::MissingCredentials`] before attempting any network call,
//! transport and non-success statuses as [`CommsError::Gateway`], and empty,
//! unparseable or off-schema bodies as [`CommsError::MalformedResponse`].
//!
//! [`CommsError::MissingCredentials`]: crate::error::CommsError::MissingCredentials
//! [`CommsError::Gateway`]: crate::error::CommsError::Gateway
//! [`CommsError::MalformedResponse`]: crate::error::CommsError::MalformedResponse

use crate::error::{CommsError, Result};
use crate::issue::CommIssue;
use crate::requirement::RequirementDraft;
use crate::stakeholder::{PlanSubject, Stakeholder, StakeholderDraft};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Result shapes
// ---------------------------------------------------------------------------

/// Engagement assessment (PMBOK 5.6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub analysis: String,
    pub actions: Vec<String>,
}

/// Communication performance evaluation (PMBOK 5.7).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub score: u8,
    pub feedback: String,
    pub improvements: Vec<String>,
}

impl PerformanceReport {
    pub const MAX_SCORE: u8 = 100;

    /// Reject scores outside `0..=100`.
    pub fn validate(&self) -> Result<()> {
        if self.score > Self::MAX_SCORE {
            return Err(CommsError::MalformedResponse(format!(
                "score {} is outside 0..=100",
                self.score
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AnalysisGateway
// ---------------------------------------------------------------------------

#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Identify stakeholders described in free-form project notes.
    async fn extract_stakeholders(&self, text: &str) -> Result<Vec<StakeholderDraft>>;

    /// Recommend a communication strategy for each subject.
    async fn generate_comm_plan(&self, subjects: &[PlanSubject]) -> Result<Vec<RequirementDraft>>;

    /// Assess gaps between current and desired engagement.
    async fn analyze_engagement_gaps(&self, stakeholders: &[Stakeholder]) -> Result<GapAnalysis>;

    /// Score communication performance from the issue log.
    async fn evaluate_performance(&self, issues: &[CommIssue]) -> Result<PerformanceReport>;
}
