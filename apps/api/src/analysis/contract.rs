//! Validation boundary for scoring-service output.
//!
//! `parse_analysis_result` is the only way raw model output becomes an
//! `AnalysisResult`. Nothing is clamped or guessed: a score of 0 is valid, an
//! absent or out-of-range score is a `ParseError`.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::models::{AnalysisResult, RadarMetric};

const MAX_SCORE: f64 = 100.0;

/// Every way a scoring response can fail the contract. Callers treat all of
/// these as a malformed response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("response was empty")]
    Empty,

    #[error("response is not valid JSON: {0}")]
    NotJson(String),

    #[error("response does not match the analysis schema: {0}")]
    Schema(String),

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: String, value: f64 },

    #[error("radar metric `{subject}` scores {score} above its full mark of {full_mark}")]
    RadarInconsistent {
        subject: String,
        score: u8,
        full_mark: u8,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    candidate_name: Option<String>,
    role: Option<String>,
    match_score: Option<f64>,
    radar_data: Option<Vec<RawRadarMetric>>,
    matching_skills: Option<Vec<String>>,
    missing_skills: Option<Vec<String>>,
    explanation: Option<String>,
    thought_process: Option<String>,
    experience_years: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRadarMetric {
    subject: Option<String>,
    score: Option<f64>,
    full_mark: Option<f64>,
}

/// Parses the raw text returned by the scoring service.
pub fn parse_analysis_result(raw: &str) -> Result<AnalysisResult, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::NotJson(e.to_string()))?;
    parse_analysis_value(value)
}

/// Validates an already-decoded JSON value against the analysis contract.
pub fn parse_analysis_value(value: Value) -> Result<AnalysisResult, ParseError> {
    if !value.is_object() {
        return Err(ParseError::Schema("expected a JSON object".to_string()));
    }

    let raw: RawAnalysis =
        serde_json::from_value(value).map_err(|e| ParseError::Schema(e.to_string()))?;

    let candidate_name = required_text(raw.candidate_name, "candidateName")?;
    let match_score = score_field(
        "matchScore",
        raw.match_score.ok_or(ParseError::MissingField("matchScore"))?,
    )?;
    let thought_process = required_text(raw.thought_process, "thoughtProcess")?;
    let explanation = required_text(raw.explanation, "explanation")?;

    let radar_data = raw
        .radar_data
        .ok_or(ParseError::MissingField("radarData"))?
        .into_iter()
        .enumerate()
        .map(|(index, metric)| radar_metric(index, metric))
        .collect::<Result<Vec<_>, _>>()?;
    if radar_data.is_empty() {
        return Err(ParseError::EmptyField("radarData"));
    }

    let matching_skills = dedup_skills(
        raw.matching_skills
            .ok_or(ParseError::MissingField("matchingSkills"))?,
    );
    let missing_skills = dedup_skills(
        raw.missing_skills
            .ok_or(ParseError::MissingField("missingSkills"))?,
    );

    let experience_years = raw
        .experience_years
        .map(|years| non_negative_int("experienceYears", years))
        .transpose()?;

    let role = raw.role.filter(|r| !r.trim().is_empty());

    Ok(AnalysisResult {
        candidate_name,
        role,
        match_score,
        radar_data,
        matching_skills,
        missing_skills,
        explanation,
        thought_process,
        experience_years,
    })
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ParseError> {
    let value = value.ok_or(ParseError::MissingField(field))?;
    if value.trim().is_empty() {
        return Err(ParseError::EmptyField(field));
    }
    Ok(value)
}

fn radar_metric(index: usize, raw: RawRadarMetric) -> Result<RadarMetric, ParseError> {
    let subject = raw
        .subject
        .filter(|s| !s.trim().is_empty())
        .ok_or(ParseError::MissingField("radarData.subject"))?;
    let score = score_field(
        &format!("radarData[{index}].score"),
        raw.score.ok_or(ParseError::MissingField("radarData.score"))?,
    )?;
    let full_mark = score_field(
        &format!("radarData[{index}].fullMark"),
        raw.full_mark
            .ok_or(ParseError::MissingField("radarData.fullMark"))?,
    )?;

    if score > full_mark {
        return Err(ParseError::RadarInconsistent {
            subject,
            score,
            full_mark,
        });
    }

    Ok(RadarMetric {
        subject,
        score,
        full_mark,
    })
}

/// Integral value in 0..=100. Fractions are rejected rather than rounded.
fn score_field(field: &str, value: f64) -> Result<u8, ParseError> {
    if !is_integral(value) || !(0.0..=MAX_SCORE).contains(&value) {
        return Err(ParseError::OutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(value as u8)
}

fn non_negative_int(field: &str, value: f64) -> Result<u32, ParseError> {
    if !is_integral(value) || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(ParseError::OutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(value as u32)
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Drops blank entries and case-insensitive duplicates, keeping first occurrence order.
fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skills
        .into_iter()
        .filter(|skill| {
            let key = skill.trim().to_lowercase();
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "candidateName": "Jane Doe",
            "role": "Backend Engineer",
            "matchScore": 85,
            "experienceYears": 6,
            "thoughtProcess": "Six years of Go, strong Kubernetes exposure, no Rust.",
            "radarData": [
                {"subject": "Technical", "score": 88, "fullMark": 100},
                {"subject": "Soft Skills", "score": 75, "fullMark": 100},
                {"subject": "Experience", "score": 90, "fullMark": 100},
                {"subject": "Education", "score": 70, "fullMark": 100},
                {"subject": "Certifications", "score": 40, "fullMark": 100}
            ],
            "matchingSkills": ["Go", "Kubernetes"],
            "missingSkills": ["Rust"],
            "explanation": "Strong fit"
        })
    }

    fn without(field: &str) -> Value {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove(field);
        payload
    }

    #[test]
    fn test_valid_payload_round_trips_fields() {
        let raw = full_payload().to_string();
        let result = parse_analysis_result(&raw).unwrap();

        assert_eq!(result.candidate_name, "Jane Doe");
        assert_eq!(result.role.as_deref(), Some("Backend Engineer"));
        assert_eq!(result.match_score, 85);
        assert_eq!(result.experience_years, Some(6));
        assert_eq!(result.radar_data.len(), 5);
        assert_eq!(result.radar_data[0], RadarMetric::new("Technical", 88));
        assert_eq!(result.matching_skills, vec!["Go", "Kubernetes"]);
        assert_eq!(result.missing_skills, vec!["Rust"]);
        assert_eq!(result.explanation, "Strong fit");

        // Serializing back yields the same document.
        assert_eq!(serde_json::to_value(&result).unwrap(), full_payload());
    }

    #[test]
    fn test_zero_score_is_valid() {
        let mut payload = full_payload();
        payload["matchScore"] = json!(0);
        let result = parse_analysis_value(payload).unwrap();
        assert_eq!(result.match_score, 0);
    }

    #[test]
    fn test_integral_float_score_is_accepted() {
        let mut payload = full_payload();
        payload["matchScore"] = json!(85.0);
        assert_eq!(parse_analysis_value(payload).unwrap().match_score, 85);
    }

    #[test]
    fn test_missing_score_is_rejected() {
        assert_eq!(
            parse_analysis_value(without("matchScore")),
            Err(ParseError::MissingField("matchScore"))
        );
    }

    #[test]
    fn test_null_score_counts_as_missing() {
        let mut payload = full_payload();
        payload["matchScore"] = Value::Null;
        assert_eq!(
            parse_analysis_value(payload),
            Err(ParseError::MissingField("matchScore"))
        );
    }

    #[test]
    fn test_every_required_field_is_enforced() {
        for field in [
            "candidateName",
            "matchScore",
            "thoughtProcess",
            "radarData",
            "matchingSkills",
            "missingSkills",
            "explanation",
        ] {
            let err = parse_analysis_value(without(field)).unwrap_err();
            assert_eq!(err, ParseError::MissingField(field), "field {field}");
        }
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let mut payload = without("role");
        payload.as_object_mut().unwrap().remove("experienceYears");
        let result = parse_analysis_value(payload).unwrap();
        assert!(result.role.is_none());
        assert!(result.experience_years.is_none());
    }

    #[test]
    fn test_out_of_range_score_is_rejected_not_clamped() {
        for bad in [json!(101), json!(-1), json!(85.5)] {
            let mut payload = full_payload();
            payload["matchScore"] = bad.clone();
            let err = parse_analysis_value(payload).unwrap_err();
            assert!(
                matches!(err, ParseError::OutOfRange { ref field, .. } if field == "matchScore"),
                "{bad} produced {err:?}"
            );
        }
    }

    #[test]
    fn test_radar_score_above_full_mark_is_rejected() {
        let mut payload = full_payload();
        payload["radarData"][1] = json!({"subject": "Soft Skills", "score": 80, "fullMark": 50});
        assert!(matches!(
            parse_analysis_value(payload),
            Err(ParseError::RadarInconsistent { score: 80, full_mark: 50, .. })
        ));
    }

    #[test]
    fn test_radar_score_out_of_range_is_rejected() {
        let mut payload = full_payload();
        payload["radarData"][0]["score"] = json!(140);
        assert!(matches!(
            parse_analysis_value(payload),
            Err(ParseError::OutOfRange { ref field, .. }) if field == "radarData[0].score"
        ));
    }

    #[test]
    fn test_empty_radar_is_rejected() {
        let mut payload = full_payload();
        payload["radarData"] = json!([]);
        assert_eq!(
            parse_analysis_value(payload),
            Err(ParseError::EmptyField("radarData"))
        );
    }

    #[test]
    fn test_radar_with_non_standard_subjects_is_accepted() {
        let mut payload = full_payload();
        payload["radarData"] = json!([{"subject": "Leadership", "score": 60, "fullMark": 100}]);
        let result = parse_analysis_value(payload).unwrap();
        assert_eq!(result.radar_data[0].subject, "Leadership");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut payload = full_payload();
        payload["candidateName"] = json!("   ");
        assert_eq!(
            parse_analysis_value(payload),
            Err(ParseError::EmptyField("candidateName"))
        );
    }

    #[test]
    fn test_free_text_is_not_json() {
        let err = parse_analysis_result("The candidate looks great, 9/10!").unwrap_err();
        assert!(matches!(err, ParseError::NotJson(_)));
    }

    #[test]
    fn test_empty_response_is_rejected() {
        assert_eq!(parse_analysis_result(""), Err(ParseError::Empty));
        assert_eq!(parse_analysis_result("  \n "), Err(ParseError::Empty));
    }

    #[test]
    fn test_non_object_json_is_a_schema_error() {
        assert!(matches!(
            parse_analysis_result("[1, 2, 3]"),
            Err(ParseError::Schema(_))
        ));
    }

    #[test]
    fn test_wrong_field_type_is_a_schema_error() {
        let mut payload = full_payload();
        payload["matchingSkills"] = json!("Go, Kubernetes");
        assert!(matches!(
            parse_analysis_value(payload),
            Err(ParseError::Schema(_))
        ));
    }

    #[test]
    fn test_skills_are_deduplicated_case_insensitively() {
        let mut payload = full_payload();
        payload["matchingSkills"] = json!(["Go", "go", "Kubernetes", " ", "GO ", "Docker"]);
        let result = parse_analysis_value(payload).unwrap();
        assert_eq!(result.matching_skills, vec!["Go", "Kubernetes", "Docker"]);
    }

    #[test]
    fn test_negative_experience_is_rejected() {
        let mut payload = full_payload();
        payload["experienceYears"] = json!(-2);
        assert!(matches!(
            parse_analysis_value(payload),
            Err(ParseError::OutOfRange { ref field, .. }) if field == "experienceYears"
        ));
    }
}
