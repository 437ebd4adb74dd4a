use std::sync::Arc;

use crate::candidates::CandidateStore;
use crate::config::Config;
use crate::screening::ScreeningWorkflow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The single candidate store for this process. Mutated only through its methods.
    pub store: Arc<CandidateStore>,
    /// The single screening workflow; it holds its own handle to `store`.
    pub workflow: Arc<ScreeningWorkflow>,
}
