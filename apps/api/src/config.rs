use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or unparsable.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    pub extraction_timeout: Duration,
    pub scoring_timeout: Duration,
    pub max_upload_bytes: usize,
    pub seed_candidates: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            extraction_timeout: Duration::from_secs(parse_env("EXTRACTION_TIMEOUT_SECS", 30)?),
            scoring_timeout: Duration::from_secs(parse_env("SCORING_TIMEOUT_SECS", 90)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            seed_candidates: parse_env("SEED_CANDIDATES", true)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            extraction_timeout: Duration::from_secs(5),
            scoring_timeout: Duration::from_secs(5),
            max_upload_bytes: 1024 * 1024,
            seed_candidates: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("HIRESYNC_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_reads_and_trims_value() {
        std::env::set_var("HIRESYNC_TEST_TIMEOUT", " 45 ");
        let secs: u64 = parse_env("HIRESYNC_TEST_TIMEOUT", 30).unwrap();
        assert_eq!(secs, 45);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("HIRESYNC_TEST_SEED", "sometimes");
        let err = parse_env::<bool>("HIRESYNC_TEST_SEED", true).unwrap_err();
        assert!(err.to_string().contains("HIRESYNC_TEST_SEED"));
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("HIRESYNC_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("HIRESYNC_TEST_MISSING_KEY"));
    }
}
