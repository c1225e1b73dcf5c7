use super::settle;
use crate::error::{CommsError, Result};
use crate::gateway::{AnalysisGateway, GapAnalysis};
use crate::matrix::{self, MatrixRow};
use crate::request::{RequestState, Ticket};
use crate::stakeholder::Stakeholder;

const LABEL: &str = "engagement analysis";
const NOTICE: &str = "Failed to analyze engagement gaps.";

/// Monitor Stakeholder Engagement view (PMBOK 5.6).
#[derive(Debug, Default)]
pub struct EngagementCoordinator {
    analysis: Option<GapAnalysis>,
    state: RequestState,
}

impl EngagementCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the last successful analysis.
    pub fn analysis(&self) -> Option<&GapAnalysis> {
        self.analysis.as_ref()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn acknowledge(&mut self) {
        self.state.acknowledge();
    }

    pub fn matrix(&self, stakeholders: &[Stakeholder], query: &str) -> Vec<MatrixRow> {
        matrix::build_engagement_matrix(stakeholders, query)
    }

    pub fn begin_analyze(&mut self, stakeholders: &[Stakeholder]) -> Result<Ticket<Vec<Stakeholder>>> {
        if stakeholders.is_empty() {
            return Err(CommsError::EmptyField("stakeholders"));
        }
        self.state.begin(LABEL, stakeholders.to_vec())
    }

    /// Store a successful analysis; a failure keeps the previous one.
    pub fn finish_analyze(
        &mut self,
        ticket: Ticket<Vec<Stakeholder>>,
        outcome: Result<GapAnalysis>,
    ) -> Result<&GapAnalysis> {
        let analysis = settle(&mut self.state, ticket.label(), NOTICE, outcome)?;
        Ok(self.analysis.insert(analysis))
    }

    pub async fn analyze(
        &mut self,
        gateway: &dyn AnalysisGateway,
        stakeholders: &[Stakeholder],
    ) -> Result<&GapAnalysis> {
        let ticket = self.begin_analyze(stakeholders)?;
        let outcome = gateway.analyze_engagement_gaps(ticket.input()).await;
        self.finish_analyze(ticket, outcome)
    }
}
