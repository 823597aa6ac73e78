//! Base config: state backend, send retry, log file, Telegraph account, GitHub token. Loaded from env.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use tracker_core::RetryPolicy;

/// Where the per-product records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateBackend {
    /// One file per key under `STATE_DIR`.
    File,
    Sqlite,
    /// Nothing survives the process; for dry runs.
    Memory,
}

impl FromStr for StateBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StateBackend::File),
            "sqlite" => Ok(StateBackend::Sqlite),
            "memory" => Ok(StateBackend::Memory),
            other => anyhow::bail!("STATE_BACKEND must be file, sqlite or memory, got {other:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    pub backend: StateBackend,
    /// STATE_DIR, default `./output`
    pub dir: PathBuf,
    /// STATE_DATABASE_URL, default `<STATE_DIR>/state.db`
    pub database_url: String,
}

impl StateConfig {
    pub fn load() -> Result<Self> {
        let backend = match non_empty_var("STATE_BACKEND") {
            Some(v) => v.parse()?,
            None => StateBackend::File,
        };
        let dir = PathBuf::from(non_empty_var("STATE_DIR").unwrap_or_else(|| "./output".to_string()));
        let database_url = non_empty_var("STATE_DATABASE_URL")
            .unwrap_or_else(|| dir.join("state.db").display().to_string());
        Ok(Self {
            backend,
            dir,
            database_url,
        })
    }
}

/// Settings shared by every product line.
#[derive(Clone)]
pub struct BaseConfig {
    /// LOG_FILE
    pub log_file: String,
    pub state: StateConfig,
    /// SEND_MAX_ATTEMPTS / SEND_RETRY_DELAY_SECS
    pub retry: RetryPolicy,
    /// GH_TOKEN; raises the GitHub API rate limit.
    pub github_token: Option<String>,
    /// TELEGRAM_API_URL; also read by each channel's TelegramConfig.
    pub telegram_api_url: Option<String>,
    /// TELEGRAPH_ACCESS_TOKEN; without it oversized releases cannot be published.
    pub telegraph_access_token: Option<String>,
    /// TELEGRAPH_AUTHOR_NAME, overrides the per-product byline.
    pub telegraph_author_name: Option<String>,
    /// TELEGRAPH_AUTHOR_URL
    pub telegraph_author_url: Option<String>,
}

impl std::fmt::Debug for BaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseConfig")
            .field("log_file", &self.log_file)
            .field("state", &self.state)
            .field("retry", &self.retry)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("telegram_api_url", &self.telegram_api_url)
            .field(
                "telegraph_access_token",
                &self.telegraph_access_token.as_ref().map(|_| "***"),
            )
            .field("telegraph_author_name", &self.telegraph_author_name)
            .field("telegraph_author_url", &self.telegraph_author_url)
            .finish()
    }
}

impl BaseConfig {
    pub fn load() -> Result<Self> {
        let log_file = non_empty_var("LOG_FILE").unwrap_or_else(|| "logs/release-tracker.log".to_string());
        let state = StateConfig::load()?;

        let max_attempts = parse_var("SEND_MAX_ATTEMPTS", RetryPolicy::DEFAULT.max_attempts)?;
        let delay_secs = parse_var("SEND_RETRY_DELAY_SECS", RetryPolicy::DEFAULT.delay.as_secs())?;
        let retry = RetryPolicy::fixed(max_attempts, Duration::from_secs(delay_secs));

        Ok(Self {
            log_file,
            state,
            retry,
            github_token: non_empty_var("GH_TOKEN"),
            telegram_api_url: non_empty_var("TELEGRAM_API_URL"),
            telegraph_access_token: non_empty_var("TELEGRAPH_ACCESS_TOKEN"),
            telegraph_author_name: non_empty_var("TELEGRAPH_AUTHOR_NAME"),
            telegraph_author_url: non_empty_var("TELEGRAPH_AUTHOR_URL"),
        })
    }

    /// Validate config (URLs must parse when set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("TELEGRAM_API_URL is set but not a valid URL: {}", url_str);
            }
        }
        if let Some(ref url_str) = self.telegraph_author_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("TELEGRAPH_AUTHOR_URL is set but not a valid URL: {}", url_str);
            }
        }
        Ok(())
    }
}

pub(super) fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(key) {
        Some(v) => v.parse().with_context(|| format!("{key} must be a number, got {v:?}")),
        None => Ok(default),
    }
}
