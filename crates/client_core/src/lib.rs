//! Report request controller: submission state machine and the single
//! network round trip behind it.

use std::sync::Arc;

use shared::catalog::default_report_type;
use shared::protocol::GenerateReportRequest;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub mod backend;
pub mod config;

pub use backend::{BackendError, HttpReportBackend, ReportBackend};
pub use config::{load_settings, Settings};

/// Visible state of the report request lifecycle.
///
/// Exactly one variant holds at any time. `Pending` carries no
/// payload; a completed call always lands in `Succeeded` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
    Succeeded { report: String },
    Failed { message: String },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// Pure projection of the state for a front end to render.
    pub fn projection(&self) -> Projection {
        match self {
            RequestState::Idle => Projection {
                submit_enabled: true,
                panel: None,
            },
            RequestState::Pending => Projection {
                submit_enabled: false,
                panel: None,
            },
            RequestState::Succeeded { report } => Projection {
                submit_enabled: true,
                panel: Some(ResultPanel::Report(report.clone())),
            },
            RequestState::Failed { message } => Projection {
                submit_enabled: true,
                panel: Some(ResultPanel::Error(message.clone())),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    /// Report text to render verbatim, whitespace and newlines intact.
    Report(String),
    /// Failure message; front ends prefix it as an error when shown.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub submit_enabled: bool,
    pub panel: Option<ResultPanel>,
}

/// One submission's worth of input, built fresh from the controller's
/// current fields and discarded once the call resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub input_text: String,
    pub report_type: String,
}

impl From<ReportRequest> for GenerateReportRequest {
    fn from(request: ReportRequest) -> Self {
        Self {
            input_text: request.input_text,
            report_type: request.report_type,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("input text must not be empty")]
    EmptyInput,
}

struct ControllerState {
    input_text: String,
    report_type: String,
    request: RequestState,
    /// Sequence number of the most recently issued submission. A
    /// completion whose stamp no longer matches is discarded, so the
    /// latest-issued submission always owns the visible state.
    issued_seq: u64,
}

pub struct ReportController {
    backend: Arc<dyn ReportBackend>,
    inner: Mutex<ControllerState>,
    states: broadcast::Sender<RequestState>,
}

impl ReportController {
    pub fn new(backend: Arc<dyn ReportBackend>) -> Arc<Self> {
        let (states, _) = broadcast::channel(64);
        Arc::new(Self {
            backend,
            inner: Mutex::new(ControllerState {
                input_text: String::new(),
                report_type: default_report_type().to_string(),
                request: RequestState::Idle,
                issued_seq: 0,
            }),
            states,
        })
    }

    pub async fn set_input_text(&self, input_text: impl Into<String>) {
        self.inner.lock().await.input_text = input_text.into();
    }

    /// Report types are opaque labels; the controller passes them
    /// through to the backend unmodified and does not validate them
    /// against the catalog.
    pub async fn set_report_type(&self, report_type: impl Into<String>) {
        self.inner.lock().await.report_type = report_type.into();
    }

    pub async fn state(&self) -> RequestState {
        self.inner.lock().await.request.clone()
    }

    /// Every state transition is re-broadcast here, so a front end can
    /// observe `Pending` and the final outcome without polling.
    pub fn subscribe_states(&self) -> broadcast::Receiver<RequestState> {
        self.states.subscribe()
    }

    /// Submits the current input to the backend.
    ///
    /// Transitions to `Pending` before the network call starts, even
    /// if an earlier submission is still in flight; the newest
    /// submission takes ownership of the visible state. Returns an
    /// error only for empty input, which is rejected before `Pending`;
    /// every network or decode failure ends in `Failed` instead.
    pub async fn submit_report(&self) -> Result<(), SubmitError> {
        let (seq, request) = {
            let mut inner = self.inner.lock().await;
            if inner.input_text.trim().is_empty() {
                return Err(SubmitError::EmptyInput);
            }
            inner.issued_seq += 1;
            inner.request = RequestState::Pending;
            let _ = self.states.send(RequestState::Pending);
            (
                inner.issued_seq,
                ReportRequest {
                    input_text: inner.input_text.clone(),
                    report_type: inner.report_type.clone(),
                },
            )
        };

        info!(
            seq,
            report_type = %request.report_type,
            "report: submission issued"
        );

        let outcome = self.backend.generate_report(&request.into()).await;
        self.apply_outcome(seq, outcome).await;
        Ok(())
    }

    async fn apply_outcome(&self, seq: u64, outcome: Result<String, BackendError>) {
        let mut inner = self.inner.lock().await;
        if seq != inner.issued_seq {
            warn!(
                seq,
                latest = inner.issued_seq,
                "report: discarding completion superseded by a newer submission"
            );
            return;
        }

        let next = match outcome {
            Ok(report) => {
                info!(seq, "report: submission succeeded");
                RequestState::Succeeded { report }
            }
            Err(err) => {
                warn!(seq, "report: submission failed: {err}");
                RequestState::Failed {
                    message: err.to_string(),
                }
            }
        };
        inner.request = next.clone();
        let _ = self.states.send(next);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
