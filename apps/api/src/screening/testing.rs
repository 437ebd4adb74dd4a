//! In-process stand-ins for the external collaborators, shared by workflow and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::analysis::{AnalysisResult, RadarMetric, RADAR_SUBJECTS};
use crate::screening::extractor::{ExtractionError, TextExtractor};
use crate::screening::scorer::{Scorer, ScoringError};

/// The "Jane Doe" analysis used across screening tests.
pub fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        candidate_name: "Jane Doe".to_string(),
        role: Some("Backend Engineer".to_string()),
        match_score: 85,
        radar_data: RADAR_SUBJECTS
            .iter()
            .zip([88, 75, 90, 70, 40])
            .map(|(subject, score)| RadarMetric::new(subject, score))
            .collect(),
        matching_skills: vec!["Go".to_string(), "Kubernetes".to_string()],
        missing_skills: vec!["Rust".to_string()],
        explanation: "Strong fit".to_string(),
        thought_process: "Six years of Go in production, Kubernetes operations, no Rust.".to_string(),
        experience_years: Some(6),
    }
}

pub struct StubExtractor {
    result: Result<String, ExtractionError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubExtractor {
    pub fn text(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: ExtractionError) -> Self {
        Self {
            result: Err(err),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for StubExtractor {
    async fn extract(&self, _content: Bytes) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

pub struct StubScorer {
    result: Result<AnalysisResult, ScoringError>,
    delay: Option<Duration>,
    panics: bool,
    calls: AtomicUsize,
    last_input: Mutex<Option<(String, String)>>,
}

impl StubScorer {
    pub fn returning(analysis: AnalysisResult) -> Self {
        Self::with_result(Ok(analysis))
    }

    pub fn failing(err: ScoringError) -> Self {
        Self::with_result(Err(err))
    }

    /// Panics inside `score`, the way a crashing client library would.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::with_result(Err(ScoringError::Service("unreachable".into())))
        }
    }

    fn with_result(result: Result<AnalysisResult, ScoringError>) -> Self {
        Self {
            result,
            delay: None,
            panics: false,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(resume_text, job_description)` of the most recent call.
    pub fn last_input(&self) -> Option<(String, String)> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scorer for StubScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() =
            Some((resume_text.to_string(), job_description.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panics {
            panic!("scorer crashed");
        }
        self.result.clone()
    }
}
