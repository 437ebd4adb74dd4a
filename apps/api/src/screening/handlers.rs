//! Axum route handlers for the Screening API.

use std::sync::Arc;

use axum::{
    extract::multipart::MultipartRejection,
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::candidates::CandidateRecord;
use crate::errors::AppError;
use crate::screening::workflow::{ScreeningPhase, Submission};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningStatusResponse {
    pub phase: ScreeningPhase,
    pub last_outcome: Option<ScreeningPhase>,
}

/// POST /api/v1/screenings
///
/// Multipart body with a `resume` file part and a `job_description` text part.
/// Runs extraction and scoring, then returns the new PENDING record.
pub async fn handle_submit_screening(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CandidateRecord>), AppError> {
    let mut multipart = multipart?;
    let mut file_name = None;
    let mut content = Bytes::new();
    let mut job_description = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                file_name = field.file_name().map(str::to_string);
                content = field.bytes().await?;
            }
            JOB_DESCRIPTION_FIELD => job_description = field.text().await?,
            _ => {}
        }
    }

    let submission = Submission {
        file_name,
        content,
        job_description,
    };

    // Spawned so that a dropped connection cannot abandon the workflow mid-phase.
    let workflow = Arc::clone(&state.workflow);
    let record = tokio::spawn(async move { workflow.run(submission).await })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("screening task failed: {e}")))??;

    Ok((StatusCode::CREATED, Json(CandidateRecord::clone(&record))))
}

/// GET /api/v1/screenings/status
pub async fn handle_screening_status(
    State(state): State<AppState>,
) -> Json<ScreeningStatusResponse> {
    Json(ScreeningStatusResponse {
        phase: state.workflow.phase(),
        last_outcome: state.workflow.last_outcome(),
    })
}
