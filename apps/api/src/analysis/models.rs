use serde::{Deserialize, Serialize};

/// Competency dimensions the scoring prompt asks for, in display order.
pub const RADAR_SUBJECTS: [&str; 5] = [
    "Technical",
    "Soft Skills",
    "Experience",
    "Education",
    "Certifications",
];

/// One named competency dimension with a 0–100 score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarMetric {
    pub subject: String,
    pub score: u8,
    pub full_mark: u8,
}

impl RadarMetric {
    pub fn new(subject: &str, score: u8) -> Self {
        Self {
            subject: subject.to_string(),
            score,
            full_mark: 100,
        }
    }
}

/// Structured scoring output for one candidate against one job description.
///
/// Results coming from the scoring service are only built through
/// `parse_analysis_result`, which enforces the range and presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub candidate_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub match_score: u8,
    pub radar_data: Vec<RadarMetric>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub explanation: String,
    pub thought_process: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
}
