use crate::query::{SearchField, Searchable};
use crate::types::{Impact, IssueStatus};
use serde::{Deserialize, Serialize};

/// An entry in the communication issue log. Read-only: there is no create
/// or update path for issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommIssue {
    pub id: String,
    pub date: String,
    /// Stakeholder name, not id.
    pub stakeholder: String,
    pub description: String,
    pub impact: Impact,
    pub status: IssueStatus,
}

impl CommIssue {
    pub fn is_open(&self) -> bool {
        self.status == IssueStatus::Open
    }
}

impl Searchable for CommIssue {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField {
            name: "stakeholder",
            get: |i| i.stakeholder.as_str(),
        },
        SearchField {
            name: "description",
            get: |i| i.description.as_str(),
        },
        SearchField {
            name: "status",
            get: |i| i.status.as_str(),
        },
    ];
}
