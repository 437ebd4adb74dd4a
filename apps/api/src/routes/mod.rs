pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::screening::handlers as screenings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates (dashboard + detail view)
        .route("/api/v1/candidates", get(candidates::handle_list_candidates))
        .route(
            "/api/v1/candidates/stats",
            get(candidates::handle_candidate_stats),
        )
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        .route(
            "/api/v1/candidates/:id/status",
            patch(candidates::handle_update_status),
        )
        // Screening workflow
        .route(
            "/api/v1/screenings",
            post(screenings::handle_submit_screening),
        )
        .route(
            "/api/v1/screenings/status",
            get(screenings::handle_screening_status),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
