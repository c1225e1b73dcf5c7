//! Top-level application state.
//!
//! `AppModel` owns every collection. Each slice has exactly one writer
//! function; views read through the accessors and hand replacement data
//! back through the writers, never mutating a slice in place.

use crate::error::{CommsError, Result};
use crate::feedback::{CommFeedback, FeedbackLog, NewFeedback, Rating};
use crate::ids::{self, IdGenerator};
use crate::io;
use crate::issue::CommIssue;
use crate::requirement::{CommRequirement, NewRequirement};
use crate::settings::ProjectSettings;
use crate::stakeholder::{Stakeholder, StakeholderDraft};
use crate::types::{EngagementLevel, Impact, Influence, IssueStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppModel {
    stakeholders: Vec<Stakeholder>,
    requirements: Vec<CommRequirement>,
    issues: Vec<CommIssue>,
    feedback: FeedbackLog,
    settings: ProjectSettings,
}

impl AppModel {
    /// The demo data set the dashboard starts with.
    pub fn seeded() -> Self {
        Snapshot::demo().into_model()
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = settings;
        self
    }

    // -----------------------------------------------------------------------
    // Readers
    // -----------------------------------------------------------------------

    pub fn stakeholders(&self) -> &[Stakeholder] {
        &self.stakeholders
    }

    pub fn requirements(&self) -> &[CommRequirement] {
        &self.requirements
    }

    pub fn issues(&self) -> &[CommIssue] {
        &self.issues
    }

    pub fn feedback(&self) -> &FeedbackLog {
        &self.feedback
    }

    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    // -----------------------------------------------------------------------
    // Writers
    // -----------------------------------------------------------------------

    /// Discard the current stakeholders and install `stakeholders`.
    pub fn replace_stakeholders(&mut self, stakeholders: Vec<Stakeholder>) {
        self.stakeholders = stakeholders;
    }

    /// Append a manually entered stakeholder with a fresh id.
    pub fn add_stakeholder(&mut self, draft: StakeholderDraft) -> Result<Stakeholder> {
        draft.validate()?;
        let stakeholder = Stakeholder::from_draft(IdGenerator::next(ids::MANUAL), draft);
        self.stakeholders.push(stakeholder.clone());
        Ok(stakeholder)
    }

    pub fn replace_requirements(&mut self, requirements: Vec<CommRequirement>) {
        self.requirements = requirements;
    }

    pub fn add_requirement(&mut self, new: NewRequirement) -> Result<CommRequirement> {
        new.validate()?;
        let requirement = CommRequirement::from_new(IdGenerator::next(ids::MANUAL), new);
        self.requirements.push(requirement.clone());
        Ok(requirement)
    }

    pub fn remove_requirement(&mut self, id: &str) -> Result<CommRequirement> {
        let pos = self
            .requirements
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CommsError::RequirementNotFound(id.to_string()))?;
        Ok(self.requirements.remove(pos))
    }

    pub fn record_feedback(&mut self, new: NewFeedback) -> Result<CommFeedback> {
        self.feedback.record(new)
    }

    pub fn replace_settings(&mut self, settings: ProjectSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A serializable data set used to seed a model (demo data or a fixture
/// file). Loading never writes back to the source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub stakeholders: Vec<Stakeholder>,
    #[serde(default)]
    pub requirements: Vec<CommRequirement>,
    #[serde(default)]
    pub issues: Vec<CommIssue>,
    /// Most recent first.
    #[serde(default)]
    pub feedback: Vec<CommFeedback>,
    #[serde(default)]
    pub settings: Option<ProjectSettings>,
}

impl Snapshot {
    /// Load a YAML or JSON snapshot (JSON is valid YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    /// Write the data set as YAML to a new or existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(path, data.as_bytes())
    }

    pub fn into_model(self) -> AppModel {
        AppModel {
            stakeholders: self.stakeholders,
            requirements: self.requirements,
            issues: self.issues,
            feedback: FeedbackLog::from_entries(self.feedback),
            settings: self.settings.unwrap_or_default(),
        }
    }

    pub fn demo() -> Self {
        Self {
            stakeholders: vec![
                demo_stakeholder("1", "Dr. Emily Chen", "Sponsor", EngagementLevel::Supportive, EngagementLevel::Leading, Influence::High, Influence::High),
                demo_stakeholder("2", "Mark Davis", "Product Owner", EngagementLevel::Neutral, EngagementLevel::Supportive, Influence::High, Influence::High),
                demo_stakeholder("3", "Sarah Miller", "Eng. Lead", EngagementLevel::Resistant, EngagementLevel::Supportive, Influence::Low, Influence::High),
                demo_stakeholder("4", "Steering Comm.", "Governance", EngagementLevel::Neutral, EngagementLevel::Supportive, Influence::High, Influence::Low),
                demo_stakeholder("5", "End Users", "User Group", EngagementLevel::Unaware, EngagementLevel::Supportive, Influence::Low, Influence::High),
            ],
            requirements: vec![CommRequirement {
                id: "1".to_string(),
                stakeholder_id: "1".to_string(),
                stakeholder_name: "Dr. Emily Chen".to_string(),
                info_needed: "Project Status Report".to_string(),
                format: "PDF Dashboard".to_string(),
                frequency: "Weekly".to_string(),
                channel: "Email".to_string(),
                owner: "Project Manager".to_string(),
            }],
            issues: vec![
                demo_issue("1", "2023-10-15", "Engineering Lead", "Didn't receive architecture specs on time", Impact::High, IssueStatus::Resolved),
                demo_issue("2", "2023-10-18", "Marketing VP", "Weekly report too technical", Impact::Medium, IssueStatus::Open),
                demo_issue("3", "2023-10-20", "External Vendor", "Email firewall blocking attachments", Impact::High, IssueStatus::Open),
            ],
            feedback: vec![
                demo_feedback("1", "2023-10-22", "Sponsor", "Monthly Steering Deck", 5, "Excellent summary, very clear."),
                demo_feedback("2", "2023-10-24", "Dev Team", "Daily Standup Notes", 3, "Arriving too late in the day."),
            ],
            settings: None,
        }
    }
}

fn demo_stakeholder(
    id: &str,
    name: &str,
    role: &str,
    current: EngagementLevel,
    desired: EngagementLevel,
    power: Influence,
    interest: Influence,
) -> Stakeholder {
    Stakeholder {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        current_engagement: current,
        desired_engagement: desired,
        power,
        interest,
    }
}

fn demo_issue(
    id: &str,
    date: &str,
    stakeholder: &str,
    description: &str,
    impact: Impact,
    status: IssueStatus,
) -> CommIssue {
    CommIssue {
        id: id.to_string(),
        date: date.to_string(),
        stakeholder: stakeholder.to_string(),
        description: description.to_string(),
        impact,
        status,
    }
}

fn demo_feedback(
    id: &str,
    date: &str,
    stakeholder: &str,
    item: &str,
    rating: u8,
    comment: &str,
) -> CommFeedback {
    CommFeedback {
        id: id.to_string(),
        date: date.to_string(),
        stakeholder: stakeholder.to_string(),
        item: item.to_string(),
        rating: Rating::saturating(rating),
        comment: comment.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
