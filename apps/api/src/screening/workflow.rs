//! Screening Workflow state machine.
//!
//! ```text
//! IDLE --submit--> PARSING --extraction ok--> ANALYZING --scoring ok--> SUCCESS --reset--> IDLE
//!                     |                           |
//!                     +--extraction failed--> FAILED <--scoring failed--+
//!                                                |
//!                                                +--reset--> IDLE
//! ```
//!
//! One workflow instance exists per service. A submission that arrives while
//! the phase is not IDLE is refused with `ScreeningError::Busy`; a submission
//! that fails its preconditions never leaves IDLE. Nothing is retried, and a
//! record reaches the store only after scoring has fully succeeded.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::analysis::AnalysisResult;
use crate::candidates::{CandidateId, CandidateRecord, CandidateStore, StoreError};
use crate::screening::extractor::{ExtractionError, TextExtractor};
use crate::screening::scorer::{Scorer, ScoringError};

#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Submission precondition unmet; the workflow never started.
    #[error("{0}")]
    Validation(String),

    #[error("A screening is already in progress")]
    Busy,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Observable phase of the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreeningPhase {
    Idle,
    Parsing,
    Analyzing,
    Success {
        #[serde(rename = "candidateId")]
        candidate_id: CandidateId,
    },
    Failed {
        message: String,
    },
}

/// Inputs that drive `ScreeningPhase::apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreeningEvent {
    Submit,
    ExtractionComplete,
    ExtractionFailed(String),
    /// Scoring succeeded and the record with this id is committed.
    ScoringComplete(CandidateId),
    ScoringFailed(String),
    /// Outcome surfaced to the caller; return to IDLE.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid screening transition: {event:?} while {from:?}")]
pub struct InvalidTransition {
    pub from: ScreeningPhase,
    pub event: ScreeningEvent,
}

impl ScreeningPhase {
    /// Pure transition function. Anything not drawn in the module diagram is rejected.
    pub fn apply(self, event: ScreeningEvent) -> Result<ScreeningPhase, InvalidTransition> {
        use ScreeningEvent as E;
        use ScreeningPhase as P;

        match (self, event) {
            (P::Idle, E::Submit) => Ok(P::Parsing),
            (P::Parsing, E::ExtractionComplete) => Ok(P::Analyzing),
            (P::Parsing, E::ExtractionFailed(message)) => Ok(P::Failed { message }),
            (P::Analyzing, E::ScoringComplete(candidate_id)) => Ok(P::Success { candidate_id }),
            (P::Analyzing, E::ScoringFailed(message)) => Ok(P::Failed { message }),
            (P::Success { .. } | P::Failed { .. }, E::Reset) => Ok(P::Idle),
            (from, event) => Err(InvalidTransition { from, event }),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ScreeningPhase::Idle)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScreeningPhase::Success { .. } | ScreeningPhase::Failed { .. }
        )
    }
}

/// One resume + job description pair submitted for screening.
#[derive(Debug, Clone)]
pub struct Submission {
    pub file_name: Option<String>,
    pub content: Bytes,
    pub job_description: String,
}

impl Submission {
    /// File present and non-empty, job description non-blank.
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.content.is_empty() {
            return Err(ScreeningError::Validation(
                "A non-empty resume file is required".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(ScreeningError::Validation(
                "Job description cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WorkflowTimeouts {
    pub extraction: Duration,
    pub scoring: Duration,
}

impl Default for WorkflowTimeouts {
    fn default() -> Self {
        Self {
            extraction: Duration::from_secs(30),
            scoring: Duration::from_secs(90),
        }
    }
}

pub struct ScreeningWorkflow {
    extractor: Arc<dyn TextExtractor>,
    scorer: Arc<dyn Scorer>,
    store: Arc<CandidateStore>,
    timeouts: WorkflowTimeouts,
    phase: watch::Sender<ScreeningPhase>,
    /// Terminal phase of the most recent run, kept until the next submission.
    last_outcome: watch::Sender<Option<ScreeningPhase>>,
}

impl ScreeningWorkflow {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        scorer: Arc<dyn Scorer>,
        store: Arc<CandidateStore>,
        timeouts: WorkflowTimeouts,
    ) -> Self {
        let (phase, _) = watch::channel(ScreeningPhase::Idle);
        let (last_outcome, _) = watch::channel(None);
        Self {
            extractor,
            scorer,
            store,
            timeouts,
            phase,
            last_outcome,
        }
    }

    pub fn phase(&self) -> ScreeningPhase {
        self.phase.borrow().clone()
    }

    pub fn last_outcome(&self) -> Option<ScreeningPhase> {
        self.last_outcome.borrow().clone()
    }

    /// Receiver that observes every phase change.
    pub fn subscribe(&self) -> watch::Receiver<ScreeningPhase> {
        self.phase.subscribe()
    }

    /// Drives one submission to SUCCESS or FAILED, then back to IDLE.
    ///
    /// Returns the committed record, or the error that was surfaced.
    pub async fn run(
        &self,
        submission: Submission,
    ) -> Result<Arc<CandidateRecord>, ScreeningError> {
        submission.validate()?;

        self.transition(ScreeningEvent::Submit)
            .map_err(|_| ScreeningError::Busy)?;
        self.last_outcome.send_replace(None);
        info!(
            file_name = submission.file_name.as_deref().unwrap_or("<unnamed>"),
            bytes = submission.content.len(),
            "Screening started"
        );

        let mut guard = RunGuard {
            workflow: self,
            finished: false,
        };
        let outcome = self.drive(&submission).await;
        guard.finished = true;

        match &outcome {
            Ok(record) => info!(
                candidate_id = %record.id,
                match_score = record.match_score(),
                "Screening succeeded"
            ),
            Err(e) => warn!("Screening failed: {e}"),
        }
        self.finish();

        outcome
    }

    /// Records the terminal phase as the last outcome and returns to IDLE.
    fn finish(&self) {
        let terminal = self.phase();
        if terminal.is_terminal() {
            self.last_outcome.send_replace(Some(terminal));
        }
        self.advance(ScreeningEvent::Reset);
    }

    async fn drive(
        &self,
        submission: &Submission,
    ) -> Result<Arc<CandidateRecord>, ScreeningError> {
        let resume_text = match self.extract(submission).await {
            Ok(text) => text,
            Err(e) => {
                self.advance(ScreeningEvent::ExtractionFailed(e.to_string()));
                return Err(e.into());
            }
        };
        self.advance(ScreeningEvent::ExtractionComplete);

        let analysis = match self.score(&resume_text, &submission.job_description).await {
            Ok(analysis) => analysis,
            Err(e) => {
                self.advance(ScreeningEvent::ScoringFailed(e.to_string()));
                return Err(e.into());
            }
        };

        let record = CandidateRecord::new_pending(analysis, Utc::now());
        match self.store.add_record(record).await {
            Ok(record) => {
                self.advance(ScreeningEvent::ScoringComplete(record.id.clone()));
                Ok(record)
            }
            Err(e) => {
                self.advance(ScreeningEvent::ScoringFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    async fn extract(&self, submission: &Submission) -> Result<String, ExtractionError> {
        let limit = self.timeouts.extraction;
        timeout(limit, self.extractor.extract(submission.content.clone()))
            .await
            .unwrap_or(Err(ExtractionError::Timeout(limit)))
    }

    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, ScoringError> {
        let limit = self.timeouts.scoring;
        timeout(limit, self.scorer.score(resume_text, job_description))
            .await
            .unwrap_or(Err(ScoringError::Timeout(limit)))
    }

    /// Applies `event` atomically against the current phase.
    fn transition(&self, event: ScreeningEvent) -> Result<(), InvalidTransition> {
        let mut result = Ok(());
        self.phase.send_if_modified(|phase| {
            match phase.clone().apply(event) {
                Ok(next) => {
                    debug!(from = ?phase, to = ?next, "Screening phase change");
                    *phase = next;
                    true
                }
                Err(e) => {
                    result = Err(e);
                    false
                }
            }
        });
        result
    }

    /// Transition that only the run holding the non-idle phase performs, so it cannot race.
    fn advance(&self, event: ScreeningEvent) {
        if let Err(e) = self.transition(event) {
            error!("{e}");
        }
    }
}

/// Held across `drive`. If the run is dropped before `drive` returns, which
/// happens when a collaborator panics inside the spawned task, the in-flight
/// phase is failed and the workflow goes back to IDLE.
struct RunGuard<'a> {
    workflow: &'a ScreeningWorkflow,
    finished: bool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let phase = self.workflow.phase();
        error!("Screening aborted while {phase:?}");
        let reason = "Screening aborted before completion".to_string();
        match phase {
            ScreeningPhase::Parsing => {
                self.workflow.advance(ScreeningEvent::ExtractionFailed(reason))
            }
            ScreeningPhase::Analyzing => {
                self.workflow.advance(ScreeningEvent::ScoringFailed(reason))
            }
            _ => {}
        }
        self.workflow.finish();
    }
}
