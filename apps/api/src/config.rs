use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Static job catalog, keyed by domain.
    pub jobs_file: PathBuf,
    /// Replacement job board adapter definition. Defaults to the built-in Indeed adapter.
    pub job_board_config: Option<PathBuf>,
    pub ai_timeout: Duration,
    pub scrape_timeout: Duration,
    /// Zero disables the background catalog refresh.
    pub catalog_refresh_interval: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jobs_file: std::env::var("JOBS_FILE")
                .unwrap_or_else(|_| "data/jobs.json".to_string())
                .into(),
            job_board_config: std::env::var("JOB_BOARD_CONFIG").ok().map(PathBuf::from),
            ai_timeout: Duration::from_secs(env_or("AI_TIMEOUT_SECS", 30)?),
            scrape_timeout: Duration::from_secs(env_or("SCRAPE_TIMEOUT_SECS", 45)?),
            catalog_refresh_interval: Duration::from_secs(env_or(
                "CATALOG_REFRESH_INTERVAL_SECS",
                0,
            )?),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            jobs_file: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/jobs.json")),
            job_board_config: None,
            ai_timeout: Duration::from_secs(5),
            scrape_timeout: Duration::from_secs(5),
            catalog_refresh_interval: Duration::ZERO,
            max_upload_bytes: 1024 * 1024,
        }
    }
}
