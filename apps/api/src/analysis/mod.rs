// Analysis Result Contract: the shape of a scoring-service response and the
// validation boundary it crosses before anything else in the service sees it.

pub mod contract;
pub mod models;

pub use contract::{parse_analysis_result, ParseError};
pub use models::{AnalysisResult, RadarMetric, RADAR_SUBJECTS};
