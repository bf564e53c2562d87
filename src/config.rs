//! Scraper configuration.
//!
//! Defaults are compiled in; a `.env` file or the process environment may
//! override them, and CLI flags override both (see `app::scrape_config_from_args`).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PRIMARY_URL: &str = "https://xoso.me/xsmn-{dd}-{mm}-{yyyy}.html";
pub const DEFAULT_FALLBACK_URL: &str =
    "https://www.minhngoc.net.vn/ket-qua-xo-so/mien-nam/{dd}-{mm}-{yyyy}.html";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(15);
pub const DEFAULT_STORE_PATH: &str = ".xoso/results.json";
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// URL template for the primary source, with `{dd}`, `{mm}`, `{yyyy}`.
    pub primary_url: String,
    /// URL template for the fallback source.
    pub fallback_url: String,
    /// Per-request timeout enforced by the HTTP client.
    pub request_timeout: Duration,
    /// Budget for the whole primary + fallback attempt.
    pub deadline: Duration,
    /// User-Agent strings picked from at random per request.
    pub user_agents: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            deadline: DEFAULT_DEADLINE,
            user_agents: USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
        }
    }
}

impl ScrapeConfig {
    /// Defaults overlaid with `XOSO_*` environment variables (after loading `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Ok(url) = std::env::var("XOSO_PRIMARY_URL") {
            config.primary_url = url;
        }
        if let Ok(url) = std::env::var("XOSO_FALLBACK_URL") {
            config.fallback_url = url;
        }
        if let Some(secs) = env_secs("XOSO_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = secs;
        }
        if let Some(secs) = env_secs("XOSO_DEADLINE_SECS")? {
            config.deadline = secs;
        }

        Ok(config)
    }
}

/// Store location: `XOSO_STORE_PATH` or the default relative path.
pub fn store_path_from_env() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var("XOSO_STORE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH))
}

fn env_secs(name: &str) -> Result<Option<Duration>, AppError> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(None);
    };
    parse_secs(&raw)
        .map(Some)
        .ok_or_else(|| AppError::invalid_input(format!("{name} must be a positive number of seconds, got '{raw}'.")))
}

/// Parse a positive, finite number of seconds (fractions allowed).
pub fn parse_secs(raw: &str) -> Option<Duration> {
    let secs: f64 = raw.trim().parse().ok()?;
    if secs.is_finite() && secs > 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
