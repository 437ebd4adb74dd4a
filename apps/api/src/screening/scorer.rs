use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::{parse_analysis_result, AnalysisResult, ParseError};
use crate::llm_client::{LlmClient, LlmError};
use crate::screening::prompts::{
    analysis_response_schema, build_screening_prompt, SCREENING_SYSTEM,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Malformed analysis data: {0}")]
    MalformedResponse(#[from] ParseError),

    #[error("Could not reach the scoring service: {0}")]
    Transport(String),

    #[error("The scoring service reported an error: {0}")]
    Service(String),

    #[error("Analysis timed out after {0:?}")]
    Timeout(Duration),
}

impl From<LlmError> for ScoringError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) if e.is_timeout() => {
                ScoringError::Transport("request timed out".to_string())
            }
            LlmError::Http(e) => ScoringError::Transport(e.to_string()),
            LlmError::Api { status, message } => {
                ScoringError::Service(format!("status {status}: {message}"))
            }
            LlmError::Blocked(reason) => {
                ScoringError::Service(format!("prompt blocked ({reason})"))
            }
        }
    }
}

/// Scores a resume against a job description.
///
/// Carried in `ScreeningWorkflow` as `Arc<dyn Scorer>`; swap the backend
/// without touching the workflow or the store.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, ScoringError>;
}

/// Scorer backed by the hosted model in strict JSON schema mode.
pub struct LlmScorer {
    llm: LlmClient,
}

impl LlmScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Scorer for LlmScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, ScoringError> {
        let prompt = build_screening_prompt(resume_text, job_description);
        let schema = analysis_response_schema();

        let raw = self
            .llm
            .generate_json_text(&prompt, SCREENING_SYSTEM, &schema)
            .await?;

        Ok(parse_analysis_result(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_becomes_service_error() {
        let err = ScoringError::from(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        });
        assert_eq!(
            err,
            ScoringError::Service("status 429: Resource has been exhausted".to_string())
        );
    }

    #[test]
    fn test_blocked_prompt_becomes_service_error() {
        let err = ScoringError::from(LlmError::Blocked("SAFETY".to_string()));
        assert!(matches!(err, ScoringError::Service(ref m) if m.contains("SAFETY")));
    }

    #[test]
    fn test_parse_error_becomes_malformed_response() {
        let err = ScoringError::from(ParseError::Empty);
        assert!(err.to_string().starts_with("Malformed analysis data"));
    }
}
