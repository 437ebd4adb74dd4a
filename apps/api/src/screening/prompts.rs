// Prompt constants and the strict response schema for the scoring call.

use serde_json::{json, Value};

use crate::analysis::RADAR_SUBJECTS;

/// Fixed system instruction: reason first, then score, then emit the schema.
pub const SCREENING_SYSTEM: &str = r#"Role: Senior AI Recruitment Engineer & Talent Auditor.
Task: Deep-dive analysis of a candidate's Resume against a specific Job Description (JD).

OBJECTIVES:
1. REASON: Work through the evidence step by step before deciding on any score. Record this reasoning in "thoughtProcess".
2. QUANTIFY: Provide a total matchScore (integer 0-100) based on weighted alignment.
3. EXTRACT: Isolate verified matching skills, clear missing gaps, and estimate total years of relevant experience.
4. SUMMARIZE: Write a concise verdict mentioning strengths and weaknesses.

OUTPUT SCHEMA:
{
  "candidateName": "String",
  "role": "String (current or target role, if identifiable)",
  "matchScore": Integer (0-100),
  "experienceYears": Integer,
  "thoughtProcess": "Detailed reasoning.",
  "radarData": [
    {"subject": "Technical", "score": 0-100, "fullMark": 100},
    {"subject": "Soft Skills", "score": 0-100, "fullMark": 100},
    {"subject": "Experience", "score": 0-100, "fullMark": 100},
    {"subject": "Education", "score": 0-100, "fullMark": 100},
    {"subject": "Certifications", "score": 0-100, "fullMark": 100}
  ],
  "matchingSkills": ["Array"],
  "missingSkills": ["Array"],
  "explanation": "Summary verdict."
}

You MUST respond with valid JSON only. Do NOT include any text outside the JSON object."#;

/// Scoring prompt template. Replace `{job_description}` and `{resume_text}` before sending.
pub const SCREENING_PROMPT_TEMPLATE: &str = "[JD]\n{job_description}\n[RESUME]\n{resume_text}\n";

pub fn build_screening_prompt(resume_text: &str, job_description: &str) -> String {
    SCREENING_PROMPT_TEMPLATE
        .replace("{job_description}", job_description.trim())
        .replace("{resume_text}", resume_text.trim())
}

/// Response schema sent with the request so the model answers in strict JSON mode.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "candidateName": { "type": "STRING" },
            "role": { "type": "STRING" },
            "matchScore": { "type": "INTEGER", "minimum": 0, "maximum": 100 },
            "experienceYears": { "type": "INTEGER", "minimum": 0 },
            "thoughtProcess": { "type": "STRING" },
            "radarData": {
                "type": "ARRAY",
                "minItems": RADAR_SUBJECTS.len(),
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "subject": { "type": "STRING", "enum": RADAR_SUBJECTS },
                        "score": { "type": "INTEGER", "minimum": 0, "maximum": 100 },
                        "fullMark": { "type": "INTEGER" }
                    },
                    "required": ["subject", "score", "fullMark"]
                }
            },
            "matchingSkills": { "type": "ARRAY", "items": { "type": "STRING" } },
            "missingSkills": { "type": "ARRAY", "items": { "type": "STRING" } },
            "explanation": { "type": "STRING" }
        },
        "required": [
            "candidateName",
            "matchScore",
            "thoughtProcess",
            "radarData",
            "matchingSkills",
            "missingSkills",
            "explanation"
        ],
        "propertyOrdering": [
            "candidateName",
            "role",
            "thoughtProcess",
            "matchScore",
            "experienceYears",
            "radarData",
            "matchingSkills",
            "missingSkills",
            "explanation"
        ]
    })
}
