//! Axum route handlers for the Candidates API.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::candidates::dashboard::{CandidateQuery, DashboardStats, FitBand};
use crate::candidates::models::{CandidateId, CandidateRecord, CandidateStatus};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: CandidateStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetailResponse {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub fit_band: FitBand,
}

/// GET /api/v1/candidates
///
/// Newest first, filtered by any of `search`, `fit`, `status`, `min_score`, `skill`.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    query: Result<Query<CandidateQuery>, QueryRejection>,
) -> Result<Json<Vec<CandidateRecord>>, AppError> {
    let Query(query) = query?;
    let records = state.store.list_all().await;
    Ok(Json(
        query
            .apply(&records)
            .iter()
            .map(|r| CandidateRecord::clone(r))
            .collect(),
    ))
}

/// GET /api/v1/candidates/stats
pub async fn handle_candidate_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    let records = state.store.list_all().await;
    Json(DashboardStats::from_records(&records))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateDetailResponse>, AppError> {
    let record = state.store.get_by_id(&CandidateId::from(id)).await?;
    Ok(Json(CandidateDetailResponse {
        fit_band: FitBand::of(record.match_score()),
        candidate: CandidateRecord::clone(&record),
    }))
}

/// PATCH /api/v1/candidates/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<CandidateRecord>, AppError> {
    let Json(request) = request?;
    let record = state
        .store
        .update_status(&CandidateId::from(id), request.status)
        .await?;
    Ok(Json(CandidateRecord::clone(&record)))
}
