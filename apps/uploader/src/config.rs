use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Uploader configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the service that exposes `/parse-resume/`.
    pub api_base_url: String,
    /// Session storage backend. Without it results only live for one process.
    pub redis_url: Option<String>,
    pub session_id: String,
    pub session_ttl: Duration,
    pub download_dir: PathBuf,
    /// Unset means the request may hang indefinitely.
    pub parse_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: env_or("API_BASE_URL", DEFAULT_API_BASE_URL),
            redis_url: optional_env("REDIS_URL"),
            session_id: env_or("SESSION_ID", "default"),
            session_ttl: Duration::from_secs(
                optional_env("SESSION_TTL_SECS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("SESSION_TTL_SECS must be a whole number of seconds")?
                    .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            ),
            download_dir: PathBuf::from(env_or("DOWNLOAD_DIR", ".")),
            parse_timeout: optional_env("PARSE_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("PARSE_TIMEOUT_SECS must be a whole number of seconds")?
                .map(Duration::from_secs),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
