//! Communications plan rows (PMBOK 5.3).
//!
//! `stakeholder_id` is a weak reference: generated rows leave it empty and
//! `stakeholder_name` is a denormalized copy that may drift from the
//! stakeholder record. Nothing enforces referential integrity.

use crate::error::{CommsError, Result};
use crate::query::{SearchField, Searchable};
use crate::settings::ProjectSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OWNER: &str = "Project Manager";

// ---------------------------------------------------------------------------
// CommRequirement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommRequirement {
    pub id: String,
    #[serde(default)]
    pub stakeholder_id: String,
    pub stakeholder_name: String,
    pub info_needed: String,
    pub format: String,
    pub frequency: String,
    pub channel: String,
    pub owner: String,
}

impl CommRequirement {
    /// Build a plan row from a generated suggestion.
    pub fn from_draft(id: impl Into<String>, draft: RequirementDraft) -> Self {
        let stakeholder_name = if draft.stakeholder_name.trim().is_empty() {
            "Unknown".to_string()
        } else {
            draft.stakeholder_name
        };
        Self {
            id: id.into(),
            stakeholder_id: String::new(),
            stakeholder_name,
            info_needed: draft.info_needed,
            format: draft.format,
            frequency: draft.frequency,
            channel: draft.channel,
            owner: DEFAULT_OWNER.to_string(),
        }
    }

    pub fn from_new(id: impl Into<String>, new: NewRequirement) -> Self {
        Self {
            id: id.into(),
            stakeholder_id: new.stakeholder_id.unwrap_or_default(),
            stakeholder_name: new.stakeholder_name,
            info_needed: new.info_needed,
            format: new.format,
            frequency: new.frequency,
            channel: new.channel,
            owner: new
                .owner
                .filter(|o| !o.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OWNER.to_string()),
        }
    }
}

impl Searchable for CommRequirement {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "stakeholderName",
            get: |r| r.stakeholder_name.as_str(),
        },
        SearchField {
            name: "infoNeeded",
            get: |r| r.info_needed.as_str(),
        },
        SearchField {
            name: "format",
            get: |r| r.format.as_str(),
        },
        SearchField {
            name: "channel",
            get: |r| r.channel.as_str(),
        },
    ];
}

// ---------------------------------------------------------------------------
// RequirementDraft: generated plan shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDraft {
    #[serde(default)]
    pub stakeholder_name: String,
    #[serde(default)]
    pub info_needed: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub channel: String,
}

// ---------------------------------------------------------------------------
// NewRequirement: manual entry form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequirement {
    #[serde(default)]
    pub stakeholder_id: Option<String>,
    pub stakeholder_name: String,
    pub info_needed: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub owner: Option<String>,
}

impl NewRequirement {
    pub fn validate(&self) -> Result<()> {
        if self.stakeholder_name.trim().is_empty() {
            return Err(CommsError::EmptyField("stakeholderName"));
        }
        if self.info_needed.trim().is_empty() {
            return Err(CommsError::EmptyField("infoNeeded"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Render the plan as a Markdown document headed by the project profile.
pub fn plan_to_markdown(settings: &ProjectSettings, requirements: &[CommRequirement]) -> String {
    let mut out = format!("# Communications Management Plan: {}\n\n", settings.name);
    out.push_str(&format!("- **Project manager:** {}\n", settings.manager));
    out.push_str(&format!("- **Phase:** {}\n", settings.phase));
    out.push_str(&format!("- **Methodology:** {}\n\n", settings.methodology));

    if requirements.is_empty() {
        out.push_str("_No communication requirements defined._\n");
        return out;
    }

    out.push_str("| Stakeholder | Information Needed | Format | Frequency | Channel | Owner |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for r in requirements {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            escape_cell(&r.stakeholder_name),
            escape_cell(&r.info_needed),
            escape_cell(&r.format),
            escape_cell(&r.frequency),
            escape_cell(&r.channel),
            escape_cell(&r.owner),
        ));
    }
    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> RequirementDraft {
        RequirementDraft {
            stakeholder_name: name.into(),
            info_needed: "Status".into(),
            format: "Deck".into(),
            frequency: "Monthly".into(),
            channel: "Meeting".into(),
        }
    }

    #[test]
    fn generated_rows_have_weak_reference_and_default_owner() {
        let r = CommRequirement::from_draft("auto-1-0", draft("Sponsor"));
        assert!(r.stakeholder_id.is_empty());
        assert_eq!(r.owner, DEFAULT_OWNER);
        assert_eq!(r.stakeholder_name, "Sponsor");
    }

    #[test]
    fn missing_name_becomes_unknown() {
        let r = CommRequirement::from_draft("auto-1-0", draft(""));
        assert_eq!(r.stakeholder_name, "Unknown");
    }

    #[test]
    fn draft_tolerates_missing_fields() {
        let d: RequirementDraft = serde_json::from_str(r#"{"stakeholderName":"A"}"#).unwrap();
        assert_eq!(d.stakeholder_name, "A");
        assert!(d.channel.is_empty());
    }

    #[test]
    fn new_requirement_validation() {
        let mut n = NewRequirement {
            stakeholder_name: "Dev Team".into(),
            info_needed: String::new(),
            ..Default::default()
        };
        assert!(matches!(n.validate(), Err(CommsError::EmptyField("infoNeeded"))));
        n.info_needed = "Sprint goals".into();
        n.validate().unwrap();
        let r = CommRequirement::from_new("manual-1-0", n);
        assert_eq!(r.owner, DEFAULT_OWNER);
        assert!(r.stakeholder_id.is_empty());
    }

    #[test]
    fn markdown_export_contains_rows_and_header() {
        let settings = ProjectSettings::default();
        let rows = vec![CommRequirement::from_draft("auto-1-0", draft("Sponsor | Board"))];
        let md = plan_to_markdown(&settings, &rows);
        assert!(md.starts_with("# Communications Management Plan: Enterprise CRP Migration"));
        assert!(md.contains("Alex Rivera, PMP"));
        assert!(md.contains("Sponsor \\| Board"));
        assert!(md.contains("| Monthly |"));
    }

    #[test]
    fn markdown_export_empty_plan() {
        let md = plan_to_markdown(&ProjectSettings::default(), &[]);
        assert!(md.contains("No communication requirements defined"));
    }
}
