use super::settle;
use crate::error::{CommsError, Result};
use crate::gateway::AnalysisGateway;
use crate::ids::{self, IdGenerator};
use crate::import;
use crate::request::{RequestState, Ticket};
use crate::stakeholder::{Stakeholder, StakeholderDraft};
use tracing::debug;

const LABEL: &str = "stakeholder extraction";
const NOTICE: &str = "Failed to extract stakeholders. Please try again.";

/// Data Input view: project notes in, stakeholder drafts out.
#[derive(Debug, Default)]
pub struct ExtractionCoordinator {
    input: String,
    drafts: Vec<Stakeholder>,
    saved: bool,
    state: RequestState,
}

impl ExtractionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Stakeholders from the last successful extraction, not yet saved.
    pub fn drafts(&self) -> &[Stakeholder] {
        &self.drafts
    }

    /// True once the current drafts have been handed to the model.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn acknowledge(&mut self) {
        self.state.acknowledge();
    }

    /// Read an uploaded file and append its text to the input buffer.
    /// Returns the number of characters appended; a file with no text
    /// leaves the buffer untouched.
    pub fn import_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<usize> {
        let text = import::extract_text(file_name, bytes)?;
        if text.trim().is_empty() {
            debug!(file = file_name, "imported file has no text");
            return Ok(0);
        }
        self.input = import::append_import(&self.input, file_name, &text);
        Ok(text.chars().count())
    }

    // -----------------------------------------------------------------------
    // Extraction
    // -----------------------------------------------------------------------

    pub fn begin_extract(&mut self) -> Result<Ticket<String>> {
        if self.input.trim().is_empty() {
            return Err(CommsError::EmptyField("input"));
        }
        self.state.begin(LABEL, self.input.clone())
    }

    /// Apply an extraction outcome. On success the drafts are replaced
    /// wholesale and every stakeholder gets a fresh id; on failure the
    /// previous drafts are kept.
    pub fn finish_extract(
        &mut self,
        ticket: Ticket<String>,
        outcome: Result<Vec<StakeholderDraft>>,
    ) -> Result<&[Stakeholder]> {
        let outcome = outcome.and_then(|drafts| {
            for d in &drafts {
                d.validate()
                    .map_err(|e| CommsError::MalformedResponse(format!("stakeholder: {e}")))?;
            }
            Ok(drafts)
        });
        let drafts = settle(&mut self.state, ticket.label(), NOTICE, outcome)?;
        let ids = IdGenerator::batch(ids::EXTRACTED, drafts.len());
        self.drafts = ids
            .into_iter()
            .zip(drafts)
            .map(|(id, d)| Stakeholder::from_draft(id, d))
            .collect();
        self.saved = false;
        Ok(&self.drafts)
    }

    pub async fn extract(&mut self, gateway: &dyn AnalysisGateway) -> Result<&[Stakeholder]> {
        let ticket = self.begin_extract()?;
        let outcome = gateway.extract_stakeholders(ticket.input()).await;
        self.finish_extract(ticket, outcome)
    }

    // -----------------------------------------------------------------------
    // Save
    // -----------------------------------------------------------------------

    /// Hand the drafts to `replace`, which discards the previous stakeholder
    /// collection. Refused while an extraction is outstanding, and when
    /// there is nothing to save.
    pub fn save<F>(&mut self, replace: F) -> Result<usize>
    where
        F: FnOnce(Vec<Stakeholder>),
    {
        if self.state.is_busy() {
            return Err(CommsError::Busy(LABEL));
        }
        if self.drafts.is_empty() {
            return Err(CommsError::EmptyField("drafts"));
        }
        let n = self.drafts.len();
        replace(self.drafts.clone());
        self.saved = true;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::testing::{draft, FakeGateway};
    use crate::model::AppModel;
    use std::collections::HashSet;

    fn with_notes() -> ExtractionCoordinator {
        let mut c = ExtractionCoordinator::new();
        c.set_input("Kickoff: Priya (CFO) is sceptical, Tom owns security.");
        c
    }

    #[tokio::test]
    async fn extract_assigns_fresh_unique_ids() {
        let mut c = with_notes();
        let drafts = c.extract(&FakeGateway::ok()).await.unwrap();
        assert_eq!(drafts.len(), 2);
        let ids: HashSet<_> = drafts.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|id| id.starts_with("extracted-")));
        assert_eq!(*c.state(), RequestState::Succeeded);
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_a_call() {
        let mut c = ExtractionCoordinator::new();
        c.set_input("   \n");
        let err = c.extract(&FakeGateway::ok()).await.unwrap_err();
        assert!(matches!(err, CommsError::EmptyField("input")));
        assert_eq!(*c.state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn failure_keeps_previous_drafts_and_sets_notice() {
        let mut c = with_notes();
        c.extract(&FakeGateway::ok()).await.unwrap();
        let before = c.drafts().to_vec();

        let err = c.extract(&FakeGateway::failing()).await.unwrap_err();
        assert!(err.is_gateway_failure());
        assert_eq!(c.drafts(), before.as_slice());
        assert_eq!(c.state().notice(), Some(NOTICE));
    }

    #[tokio::test]
    async fn invalid_draft_counts_as_malformed() {
        let mut c = with_notes();
        let gw = FakeGateway {
            drafts: vec![draft("", "Sponsor")],
            ..FakeGateway::ok()
        };
        let err = c.extract(&gw).await.unwrap_err();
        assert!(matches!(err, CommsError::MalformedResponse(_)));
        assert!(c.drafts().is_empty());
    }

    #[test]
    fn second_begin_while_requesting_is_busy() {
        let mut c = with_notes();
        let _ticket = c.begin_extract().unwrap();
        assert!(matches!(c.begin_extract(), Err(CommsError::Busy(_))));
        assert!(matches!(c.save(|_| {}), Err(CommsError::Busy(_))));
    }

    #[tokio::test]
    async fn save_replaces_model_stakeholders_wholesale() {
        let mut model = AppModel::seeded();
        assert_eq!(model.stakeholders().len(), 5);

        let mut c = with_notes();
        c.extract(&FakeGateway::ok()).await.unwrap();
        let n = c.save(|s| model.replace_stakeholders(s)).unwrap();

        assert_eq!(n, 2);
        assert!(c.is_saved());
        assert_eq!(model.stakeholders().len(), 2);
        assert!(model.stakeholders().iter().all(|s| s.id.starts_with("extracted-")));
        assert!(!model.stakeholders().iter().any(|s| s.name == "Dr. Emily Chen"));
    }

    #[test]
    fn save_without_drafts_keeps_register() {
        let mut model = AppModel::seeded();
        let before = model.clone();
        let mut c = ExtractionCoordinator::new();

        let err = c.save(|s| model.replace_stakeholders(s)).unwrap_err();
        assert!(matches!(err, CommsError::EmptyField("drafts")));
        assert_eq!(model, before);
        assert_eq!(model.stakeholders().len(), 5);
        assert!(!c.is_saved());
    }

    #[tokio::test]
    async fn failed_extraction_leaves_model_untouched() {
        let mut model = AppModel::seeded();
        let mut c = with_notes();
        c.extract(&FakeGateway::ok()).await.unwrap();
        c.save(|s| model.replace_stakeholders(s)).unwrap();
        let before = model.clone();

        let _ = c.extract(&FakeGateway::failing()).await;
        assert_eq!(model, before);
        assert_eq!(c.drafts(), before.stakeholders());
    }

    #[test]
    fn import_appends_with_separator() {
        let mut c = with_notes();
        let n = c.import_file("minutes.txt", b"Marketing VP wants less jargon").unwrap();
        assert_eq!(n, 30);
        assert!(c
            .input()
            .ends_with("\n\n--- IMPORTED FILE: minutes.txt ---\n\nMarketing VP wants less jargon"));
    }

    #[test]
    fn rejected_import_leaves_input_untouched() {
        let mut c = with_notes();
        let before = c.input().to_string();
        assert!(c.import_file("diagram.png", &[0x89, b'P', b'N', b'G']).is_err());
        assert_eq!(c.input(), before);
        assert_eq!(c.import_file("blank.txt", b"  \n").unwrap(), 0);
        assert_eq!(c.input(), before);
    }
}
