use crate::error::{CommsError, Result};
use crate::query::{SearchField, Searchable};
use crate::types::{EngagementLevel, Influence};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stakeholder
// ---------------------------------------------------------------------------

/// A person or group tracked for project communication purposes.
///
/// Every stakeholder carries exactly one current and one desired engagement
/// level. They may be equal (no gap) or differ; the gap has no direction or
/// magnitude attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub id: String,
    pub name: String,
    pub role: String,
    pub current_engagement: EngagementLevel,
    pub desired_engagement: EngagementLevel,
    pub power: Influence,
    pub interest: Influence,
}

impl Stakeholder {
    /// Assign `id` to an extracted or manually entered draft.
    pub fn from_draft(id: impl Into<String>, draft: StakeholderDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            role: draft.role,
            current_engagement: draft.current_engagement,
            desired_engagement: draft.desired_engagement,
            power: draft.power,
            interest: draft.interest,
        }
    }

    pub fn has_gap(&self) -> bool {
        self.current_engagement != self.desired_engagement
    }

    pub fn as_subject(&self) -> PlanSubject {
        PlanSubject {
            name: self.name.clone(),
            role: self.role.clone(),
            power: self.power,
            interest: self.interest,
        }
    }
}

impl Searchable for Stakeholder {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "name",
            get: |s| s.name.as_str(),
        },
        SearchField {
            name: "role",
            get: |s| s.role.as_str(),
        },
    ];
}

// ---------------------------------------------------------------------------
// StakeholderDraft
// ---------------------------------------------------------------------------

/// Stakeholder fields without an identity: the shape produced by the
/// extraction gateway and by the manual-entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderDraft {
    pub name: String,
    pub role: String,
    pub current_engagement: EngagementLevel,
    pub desired_engagement: EngagementLevel,
    pub power: Influence,
    pub interest: Influence,
}

impl StakeholderDraft {
    /// Reject drafts with an empty name or role.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CommsError::EmptyField("name"));
        }
        if self.role.trim().is_empty() {
            return Err(CommsError::EmptyField("role"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PlanSubject
// ---------------------------------------------------------------------------

/// The projection of a stakeholder sent for communication-plan generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSubject {
    pub name: String,
    pub role: String,
    pub power: Influence,
    pub interest: Influence,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
