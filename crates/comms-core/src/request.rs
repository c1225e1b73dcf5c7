//! Per-coordinator gateway request state machine.
//!
//! ```text
//! Idle ──begin──▶ Requesting ──succeed──▶ Succeeded ──acknowledge──▶ Idle
//!                     │
//!                     └──────fail───────▶ Failed ─────acknowledge──▶ Idle
//! ```
//!
//! `begin` is refused while a request is outstanding, which is what keeps a
//! second trigger from racing the first. Settled states may begin again
//! directly. A [`Ticket`] is only handed out by `begin`, so every completion
//! is paired with exactly one start.

use crate::error::{CommsError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Requesting,
    Succeeded,
    Failed { notice: String },
}

impl RequestState {
    /// Enter `Requesting`, carrying `input` in the returned ticket.
    pub fn begin<T>(&mut self, label: &'static str, input: T) -> Result<Ticket<T>> {
        if self.is_busy() {
            return Err(CommsError::Busy(label));
        }
        *self = RequestState::Requesting;
        Ok(Ticket { label, input })
    }

    pub fn succeed(&mut self) {
        *self = RequestState::Succeeded;
    }

    pub fn fail(&mut self, notice: impl Into<String>) {
        *self = RequestState::Failed {
            notice: notice.into(),
        };
    }

    /// Return a settled state to `Idle`. Has no effect while requesting.
    pub fn acknowledge(&mut self) {
        if !self.is_busy() {
            *self = RequestState::Idle;
        }
    }

    /// True while the triggering action must stay disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, RequestState::Requesting)
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            RequestState::Failed { notice } => Some(notice),
            _ => None,
        }
    }
}

/// Proof that a request was started, plus the input snapshot taken at start.
#[derive(Debug)]
#[must_use = "a ticket must be passed back to finish the request"]
pub struct Ticket<T> {
    label: &'static str,
    input: T,
}

impl<T> Ticket<T> {
    pub fn input(&self) -> &T {
        &self.input
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn into_input(self) -> T {
        self.input
    }
}
