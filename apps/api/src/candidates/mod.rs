// Candidate Store and the dashboard projections read from it.
// The store is the only write path for candidate records; everything else
// reads snapshots from `list_all` / `get_by_id`.

pub mod dashboard;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod store;

pub use models::{CandidateId, CandidateRecord, CandidateStatus};
pub use store::{CandidateStore, StoreError};
