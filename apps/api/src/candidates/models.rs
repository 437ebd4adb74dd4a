use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::AnalysisResult;

/// Review status of a candidate. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    #[default]
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "hold")]
    Hold,
    #[serde(alias = "rejected")]
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Pending => "PENDING",
            CandidateStatus::Approved => "APPROVED",
            CandidateStatus::Hold => "HOLD",
            CandidateStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque record identifier, the sole lookup key in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    /// Fresh id of the form `CAND-XXXXXXXXXXXX`.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("CAND-{}", hex[..12].to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted analysis plus identity, creation time and review status.
///
/// `id`, `timestamp` and the analysis never change after creation; the store
/// only ever swaps in a copy with a different `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: CandidateId,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub status: CandidateStatus,
}

impl CandidateRecord {
    /// New record for a freshly scored submission. PENDING is the only legal initial status.
    pub fn new_pending(analysis: AnalysisResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CandidateId::generate(),
            analysis,
            timestamp: created_at,
            status: CandidateStatus::Pending,
        }
    }

    pub fn match_score(&self) -> u8 {
        self.analysis.match_score
    }
}
