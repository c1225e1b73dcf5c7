use crate::error::{CommsError, Result};
use crate::types::{Methodology, ProjectPhase};
use serde::{Deserialize, Serialize};

/// Project and user profile. Exactly one instance exists per process; it is
/// replaced wholesale on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub name: String,
    pub manager: String,
    pub user_title: String,
    pub user_email: String,
    /// Profile picture as a `data:image/...` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_picture: Option<String>,
    pub phase: ProjectPhase,
    pub methodology: Methodology,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: "Enterprise CRP Migration".to_string(),
            manager: "Alex Rivera, PMP".to_string(),
            user_title: "Project Manager".to_string(),
            user_email: "alex.rivera@example.com".to_string(),
            user_picture: None,
            phase: ProjectPhase::Execution,
            methodology: Methodology::Predictive,
        }
    }
}

impl ProjectSettings {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CommsError::EmptyField("name"));
        }
        if self.manager.trim().is_empty() {
            return Err(CommsError::EmptyField("manager"));
        }
        if let Some(pic) = &self.user_picture {
            if !pic.starts_with("data:image/") {
                return Err(CommsError::InvalidPicture);
            }
        }
        Ok(())
    }
}
