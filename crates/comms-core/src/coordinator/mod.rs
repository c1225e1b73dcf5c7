//! Per-view coordinators.
//!
//! A coordinator holds the view-local state of one screen (text buffers,
//! drafts, the last analysis result) plus a [`RequestState`]. Shared domain
//! slices stay in [`AppModel`](crate::model::AppModel); coordinators read
//! them as arguments and hand replacements back through a callback.
//!
//! Every gateway operation comes in two halves. `begin_*` checks the
//! re-entry guard and snapshots the input into a [`Ticket`]; `finish_*`
//! consumes the ticket and applies the outcome. Callers that keep a
//! coordinator behind a lock take it for each half and release it across
//! the gateway await. The `async` convenience methods chain both halves for
//! single-owner callers.
//!
//! [`Ticket`]: crate::request::Ticket

mod engagement;
mod extraction;
mod performance;
mod plan;
mod settings;

pub use engagement::EngagementCoordinator;
pub use extraction::ExtractionCoordinator;
pub use performance::PerformanceCoordinator;
pub use plan::{PlanCoordinator, DEFAULT_CONSTRAINTS};
pub use settings::SettingsCoordinator;

use crate::error::Result;
use crate::request::RequestState;
use tracing::warn;

/// Settle `state` from a finished gateway call. Failures are logged and
/// turned into the coordinator's fixed `notice`; the error is still
/// returned so the caller can report its kind.
fn settle<T>(
    state: &mut RequestState,
    label: &'static str,
    notice: &str,
    outcome: Result<T>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            state.succeed();
            Ok(value)
        }
        Err(e) => {
            warn!(request = label, error = %e, "analysis request failed");
            state.fail(notice);
            Err(e)
        }
    }
}
