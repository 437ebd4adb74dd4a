//! Example candidates loaded at startup so the dashboard has data without a
//! live scoring call. One high, one medium and one low fit, covering every
//! status except PENDING.

use chrono::{DateTime, Duration, Utc};

use crate::analysis::{AnalysisResult, RadarMetric, RADAR_SUBJECTS};
use crate::candidates::models::{CandidateId, CandidateRecord, CandidateStatus};

struct Seed {
    id: &'static str,
    name: &'static str,
    role: &'static str,
    score: u8,
    years: u32,
    status: CandidateStatus,
    hours_ago: i64,
    matching: &'static [&'static str],
    missing: &'static [&'static str],
    explanation: &'static str,
    thought_process: &'static str,
    // Scores in RADAR_SUBJECTS order.
    radar: [u8; 5],
}

const SEEDS: [Seed; 3] = [
    Seed {
        id: "CAND-001",
        name: "Alex Rivera",
        role: "Senior Frontend Engineer",
        score: 92,
        years: 8,
        status: CandidateStatus::Approved,
        hours_ago: 1,
        matching: &["React", "TypeScript", "Tailwind CSS", "System Design"],
        missing: &["AWS Lambda"],
        explanation: "Highly qualified with extensive React experience and strong architectural knowledge.",
        thought_process: "Candidate has 8 years of relevant experience. Match score is high due to skill alignment.",
        radar: [95, 85, 90, 80, 70],
    },
    Seed {
        id: "CAND-002",
        name: "Sarah Chen",
        role: "Full Stack Developer",
        score: 78,
        years: 5,
        status: CandidateStatus::Hold,
        hours_ago: 2,
        matching: &["Node.js", "PostgreSQL", "React", "Docker"],
        missing: &["GraphQL", "Kubernetes"],
        explanation: "Strong full-stack profile with good backend fundamentals.",
        thought_process: "Solid experience in core tech stack. Missing some advanced orchestration skills.",
        radar: [75, 80, 75, 85, 60],
    },
    Seed {
        id: "CAND-003",
        name: "James Wilson",
        role: "Backend Engineer",
        score: 45,
        years: 3,
        status: CandidateStatus::Rejected,
        hours_ago: 3,
        matching: &["Python", "SQL"],
        missing: &["Go", "Microservices", "Distributed Systems"],
        explanation: "Experience is too junior for the current requirements.",
        thought_process: "Mismatch in required years of experience and core backend languages.",
        radar: [40, 60, 40, 70, 30],
    },
];

/// Seed records relative to `now`, newest first.
pub fn seed_candidates(now: DateTime<Utc>) -> Vec<CandidateRecord> {
    SEEDS.iter().map(|seed| seed.to_record(now)).collect()
}

impl Seed {
    fn to_record(&self, now: DateTime<Utc>) -> CandidateRecord {
        CandidateRecord {
            id: CandidateId::from(self.id),
            analysis: AnalysisResult {
                candidate_name: self.name.to_string(),
                role: Some(self.role.to_string()),
                match_score: self.score,
                radar_data: RADAR_SUBJECTS
                    .iter()
                    .zip(self.radar)
                    .map(|(subject, score)| RadarMetric::new(subject, score))
                    .collect(),
                matching_skills: owned(self.matching),
                missing_skills: owned(self.missing),
                explanation: self.explanation.to_string(),
                thought_process: self.thought_process.to_string(),
                experience_years: Some(self.years),
            },
            timestamp: now - Duration::hours(self.hours_ago),
            status: self.status,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
