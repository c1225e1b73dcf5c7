use crate::model::AppModel;
use crate::types::Impact;
use serde::Serialize;

/// Headline counts for the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub project: String,
    pub phase: String,
    pub stakeholders: usize,
    /// Stakeholders whose current and desired engagement differ. Only a
    /// count: the gap carries no direction or size.
    pub engagement_gaps: usize,
    pub requirements: usize,
    pub open_issues: usize,
    pub open_high_impact_issues: usize,
    pub feedback_entries: usize,
    pub average_rating: Option<f64>,
}

impl DashboardSummary {
    pub fn compute(model: &AppModel) -> Self {
        let open = model.issues().iter().filter(|i| i.is_open());
        Self {
            project: model.settings().name.clone(),
            phase: model.settings().phase.to_string(),
            stakeholders: model.stakeholders().len(),
            engagement_gaps: model.stakeholders().iter().filter(|s| s.has_gap()).count(),
            requirements: model.requirements().len(),
            open_issues: open.clone().count(),
            open_high_impact_issues: open.filter(|i| i.impact == Impact::High).count(),
            feedback_entries: model.feedback().len(),
            average_rating: model.feedback().average_rating(),
        }
    }
}
