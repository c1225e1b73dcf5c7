use super::settle;
use crate::error::{CommsError, Result};
use crate::feedback::{CommFeedback, FeedbackLog};
use crate::gateway::{AnalysisGateway, PerformanceReport};
use crate::issue::CommIssue;
use crate::query;
use crate::request::{RequestState, Ticket};

const LABEL: &str = "performance evaluation";
const NOTICE: &str = "Failed to evaluate communication performance.";

/// Monitor Communications view (PMBOK 5.7): issue log, feedback log and the
/// AI performance score.
#[derive(Debug, Default)]
pub struct PerformanceCoordinator {
    report: Option<PerformanceReport>,
    state: RequestState,
}

impl PerformanceCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> Option<&PerformanceReport> {
        self.report.as_ref()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn acknowledge(&mut self) {
        self.state.acknowledge();
    }

    pub fn visible_issues(&self, issues: &[CommIssue], query: &str) -> Vec<CommIssue> {
        query::search(issues, query)
    }

    pub fn visible_feedback(&self, log: &FeedbackLog, query: &str) -> Vec<CommFeedback> {
        query::search(log.entries(), query)
    }

    pub fn begin_evaluate(&mut self, issues: &[CommIssue]) -> Result<Ticket<Vec<CommIssue>>> {
        if issues.is_empty() {
            return Err(CommsError::EmptyField("issues"));
        }
        self.state.begin(LABEL, issues.to_vec())
    }

    /// Store a successful evaluation. Out-of-range scores count as a
    /// malformed response and keep the previous report.
    pub fn finish_evaluate(
        &mut self,
        ticket: Ticket<Vec<CommIssue>>,
        outcome: Result<PerformanceReport>,
    ) -> Result<&PerformanceReport> {
        let outcome = outcome.and_then(|r| r.validate().map(|()| r));
        let report = settle(&mut self.state, ticket.label(), NOTICE, outcome)?;
        Ok(self.report.insert(report))
    }

    pub async fn evaluate(
        &mut self,
        gateway: &dyn AnalysisGateway,
        issues: &[CommIssue],
    ) -> Result<&PerformanceReport> {
        let ticket = self.begin_evaluate(issues)?;
        let outcome = gateway.evaluate_performance(ticket.input()).await;
        self.finish_evaluate(ticket, outcome)
    }
}
