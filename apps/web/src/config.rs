use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ANALYZE_URL: &str = "http://localhost:8000/analyze";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the external analysis endpoint.
    pub analyze_url: String,
    /// Applied to the HTTP client only. `None` leaves the network stack default.
    pub analyze_timeout: Option<Duration>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let analyze_timeout = optional_env("ANALYZE_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .context("ANALYZE_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Config {
            analyze_url: optional_env("ANALYZE_URL")
                .unwrap_or_else(|| DEFAULT_ANALYZE_URL.to_string()),
            analyze_timeout,
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: optional_env("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            analyze_url: DEFAULT_ANALYZE_URL.to_string(),
            analyze_timeout: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 3000,
            rust_log: "info".to_string(),
        }
    }
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
