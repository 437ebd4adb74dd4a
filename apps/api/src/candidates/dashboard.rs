//! Read-only projections over the store: fit bands, list filtering and the
//! summary counters shown above the candidate table.

use std::str::FromStr;
use std::sync::Arc;

use serde::de::{DeserializeOwned, Error as _, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::candidates::models::{CandidateRecord, CandidateStatus};

const HIGH_FIT_MIN: u8 = 80;
const MEDIUM_FIT_MIN: u8 = 60;

/// Coarse bucket of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitBand {
    High,
    Medium,
    Low,
}

impl FitBand {
    /// High ≥ 80, Medium 60–79, Low < 60.
    pub fn of(score: u8) -> Self {
        if score >= HIGH_FIT_MIN {
            FitBand::High
        } else if score >= MEDIUM_FIT_MIN {
            FitBand::Medium
        } else {
            FitBand::Low
        }
    }
}

/// Dashboard list filter. Every populated criterion must match.
///
/// The dashboard submits its whole filter form, so blank values and `all`
/// mean "no constraint" rather than a bad request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateQuery {
    /// Case-insensitive substring of name or role.
    pub search: Option<String>,
    /// Absent, blank or `all` means every band.
    #[serde(default, deserialize_with = "choice_or_all")]
    pub fit: Option<FitBand>,
    #[serde(default, deserialize_with = "choice_or_all")]
    pub status: Option<CandidateStatus>,
    #[serde(default, deserialize_with = "number_or_blank")]
    pub min_score: Option<u8>,
    /// Case-insensitive substring of any matching skill.
    pub skill: Option<String>,
}

impl CandidateQuery {
    pub fn matches(&self, record: &CandidateRecord) -> bool {
        let analysis = &record.analysis;

        let matches_search = match non_blank(&self.search) {
            Some(needle) => {
                contains_ci(&analysis.candidate_name, &needle)
                    || analysis
                        .role
                        .as_deref()
                        .is_some_and(|role| contains_ci(role, &needle))
            }
            None => true,
        };

        let matches_skill = match non_blank(&self.skill) {
            Some(needle) => analysis
                .matching_skills
                .iter()
                .any(|skill| contains_ci(skill, &needle)),
            None => true,
        };

        matches_search
            && matches_skill
            && self.fit.map_or(true, |band| FitBand::of(analysis.match_score) == band)
            && self.status.map_or(true, |status| record.status == status)
            && self.min_score.map_or(true, |min| analysis.match_score >= min)
    }

    /// Filters while keeping the store's newest-first order.
    pub fn apply(&self, records: &[Arc<CandidateRecord>]) -> Vec<Arc<CandidateRecord>> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Summary counters for the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    /// Rounded mean match score; 0 when there are no candidates.
    pub average_score: u8,
    pub shortlisted: usize,
    pub on_hold: usize,
    pub rejected: usize,
    pub pending: usize,
}

impl DashboardStats {
    pub fn from_records(records: &[Arc<CandidateRecord>]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self::default();
        }

        let sum: u64 = records.iter().map(|r| u64::from(r.match_score())).sum();
        let count = |status: CandidateStatus| records.iter().filter(|r| r.status == status).count();

        Self {
            total,
            average_score: (sum as f64 / total as f64).round() as u8,
            shortlisted: count(CandidateStatus::Approved),
            on_hold: count(CandidateStatus::Hold),
            rejected: count(CandidateStatus::Rejected),
            pending: count(CandidateStatus::Pending),
        }
    }
}

fn choice_or_all<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => T::deserialize(IntoDeserializer::<D::Error>::into_deserializer(v)).map(Some),
    }
}

fn number_or_blank<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid number `{v}`: {e}"))),
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
