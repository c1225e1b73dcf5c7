use super::settle;
use crate::error::{CommsError, Result};
use crate::gateway::AnalysisGateway;
use crate::ids::{self, IdGenerator};
use crate::query;
use crate::request::{RequestState, Ticket};
use crate::requirement::{self, CommRequirement, RequirementDraft};
use crate::settings::ProjectSettings;
use crate::stakeholder::{PlanSubject, Stakeholder};

const LABEL: &str = "plan generation";
const NOTICE: &str = "Failed to generate communication plan.";

/// Initial text of the assumptions & constraints box.
pub const DEFAULT_CONSTRAINTS: &str = "- All financial reports must use encrypted email.\n\
- Steering committee meets monthly on the first Tuesday.";

/// Plan Communications view (PMBOK 5.3).
#[derive(Debug)]
pub struct PlanCoordinator {
    constraints: String,
    state: RequestState,
}

impl Default for PlanCoordinator {
    fn default() -> Self {
        Self {
            constraints: DEFAULT_CONSTRAINTS.to_string(),
            state: RequestState::default(),
        }
    }
}

impl PlanCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constraints(&self) -> &str {
        &self.constraints
    }

    pub fn set_constraints(&mut self, text: impl Into<String>) {
        self.constraints = text.into();
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn acknowledge(&mut self) {
        self.state.acknowledge();
    }

    /// Plan rows matching the view's search box.
    pub fn visible(&self, requirements: &[CommRequirement], query: &str) -> Vec<CommRequirement> {
        query::search(requirements, query)
    }

    pub fn export_markdown(
        &self,
        settings: &ProjectSettings,
        requirements: &[CommRequirement],
    ) -> String {
        requirement::plan_to_markdown(settings, requirements)
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Snapshot the stakeholders as plan subjects. An empty register has
    /// nothing to plan for.
    pub fn begin_generate(&mut self, stakeholders: &[Stakeholder]) -> Result<Ticket<Vec<PlanSubject>>> {
        if stakeholders.is_empty() {
            return Err(CommsError::EmptyField("stakeholders"));
        }
        let subjects = stakeholders.iter().map(Stakeholder::as_subject).collect();
        self.state.begin(LABEL, subjects)
    }

    /// On success, build requirements with fresh `auto-` ids and hand them to
    /// `replace`, which discards the previous plan. On failure `replace` is
    /// never called.
    pub fn finish_generate<F>(
        &mut self,
        ticket: Ticket<Vec<PlanSubject>>,
        outcome: Result<Vec<RequirementDraft>>,
        replace: F,
    ) -> Result<usize>
    where
        F: FnOnce(Vec<CommRequirement>),
    {
        let drafts = settle(&mut self.state, ticket.label(), NOTICE, outcome)?;
        let ids = IdGenerator::batch(ids::AUTO, drafts.len());
        let rows: Vec<CommRequirement> = ids
            .into_iter()
            .zip(drafts)
            .map(|(id, d)| CommRequirement::from_draft(id, d))
            .collect();
        let n = rows.len();
        replace(rows);
        Ok(n)
    }

    pub async fn generate<F>(
        &mut self,
        gateway: &dyn AnalysisGateway,
        stakeholders: &[Stakeholder],
        replace: F,
    ) -> Result<usize>
    where
        F: FnOnce(Vec<CommRequirement>),
    {
        let ticket = self.begin_generate(stakeholders)?;
        let outcome = gateway.generate_comm_plan(ticket.input()).await;
        self.finish_generate(ticket, outcome, replace)
    }
}
