//! Upstream release sources.
//!
//! - [`claude_code`] – `CHANGELOG.md` with `## x.y.z` sections
//! - [`codex`] – GitHub releases Atom feed, verified through [`github`]

pub mod claude_code;
pub mod codex;
pub mod github;

use std::time::Duration;

use tracker_core::{Result, TrackerError};

pub const USER_AGENT: &str = "ai-release-tracker/1.0";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The newest release of a product as the checker sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    /// Persisted version key (the tag for Codex).
    pub key: String,
    /// Version shown in message titles.
    pub display_version: String,
    /// Release body used for messages and hashing; may be empty.
    pub body: String,
    pub source_url: Option<String>,
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| TrackerError::Config(format!("http client: {e}")))
}

/// GET returning the body text; transport failures and non-2xx are network errors.
pub(crate) async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TrackerError::Network(format!("GET {url}: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(TrackerError::Network(format!("GET {url}: HTTP {status}")));
    }
    response
        .text()
        .await
        .map_err(|e| TrackerError::Network(format!("GET {url}: {e}")))
}
