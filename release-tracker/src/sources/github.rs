//! GitHub REST API: release lookup by tag.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};
use tracker_core::{Result, TrackerError};

use super::http_client;

pub const GITHUB_API: &str = "https://api.github.com";

/// What `GET /repos/{repo}/releases/tags/{tag}` says about a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagStatus {
    /// Published, non-draft, non-prerelease; carries the canonical `tag_name`.
    Stable { tag_name: String },
    /// 404: a tag without a release object.
    TagOnly,
    Draft,
    Prerelease,
    /// 403
    RateLimited,
    /// 401
    AuthError,
    /// 5xx
    ServerError,
    NetworkError(String),
    JsonError(String),
    /// Any other non-200 status.
    ApiError(u16),
}

impl TagStatus {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TagStatus::AuthError | TagStatus::JsonError(_) | TagStatus::ApiError(_)
        )
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TagStatus::RateLimited | TagStatus::ServerError | TagStatus::NetworkError(_)
        )
    }
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
}

/// Release lookups for one repository.
pub struct GithubClient {
    client: reqwest::Client,
    api_base: String,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(repo: &str, token: Option<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            api_base: GITHUB_API.to_string(),
            repo: repo.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn tag_url(&self, tag: &str) -> String {
        format!(
            "{}/repos/{}/releases/tags/{}",
            self.api_base.trim_end_matches('/'),
            self.repo,
            tag
        )
    }

    async fn get_tag(&self, tag: &str) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .client
            .get(self.tag_url(tag))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    /// Classifies one tag.
    pub async fn release_status(&self, tag: &str) -> TagStatus {
        let response = match self.get_tag(tag).await {
            Ok(r) => r,
            Err(e) => return TagStatus::NetworkError(e.to_string()),
        };
        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => return TagStatus::TagOnly,
            StatusCode::FORBIDDEN => return TagStatus::RateLimited,
            StatusCode::UNAUTHORIZED => return TagStatus::AuthError,
            s if s.is_server_error() => return TagStatus::ServerError,
            s if s != StatusCode::OK => return TagStatus::ApiError(s.as_u16()),
            _ => {}
        }
        let release: ReleaseResponse = match response.json().await {
            Ok(r) => r,
            Err(e) => return TagStatus::JsonError(e.to_string()),
        };
        if release.draft {
            TagStatus::Draft
        } else if release.prerelease {
            TagStatus::Prerelease
        } else {
            TagStatus::Stable {
                tag_name: release.tag_name.unwrap_or_else(|| tag.to_string()),
            }
        }
    }

    /// Maps a saved version (possibly an old display title) onto a release tag.
    ///
    /// Tries `saved`, `rust-v{saved}` and `v{saved}`. Returns the canonical tag and whether it
    /// differs from `saved`. Authentication failure is an error; anything inconclusive keeps
    /// `saved` as is.
    pub async fn resolve_saved_version(&self, saved: &str) -> Result<(String, bool)> {
        let candidates = [
            saved.to_string(),
            format!("rust-v{saved}"),
            format!("v{saved}"),
        ];
        let mut transient_failures = 0;

        for candidate in &candidates {
            let response = match self.get_tag(candidate).await {
                Ok(r) => r,
                Err(e) => {
                    debug!(candidate = %candidate, error = %e, "tag lookup failed");
                    transient_failures += 1;
                    continue;
                }
            };
            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                return Err(TrackerError::Api(
                    "GitHub authentication failed (check GH_TOKEN)".to_string(),
                ));
            }
            if status.is_server_error() {
                transient_failures += 1;
                continue;
            }
            if status == StatusCode::OK {
                let Ok(release) = response.json::<ReleaseResponse>().await else {
                    continue;
                };
                let canonical = release.tag_name.unwrap_or_else(|| candidate.clone());
                let migrated = canonical != saved;
                if migrated {
                    info!(saved, tag = %canonical, "resolved saved version to release tag");
                }
                return Ok((canonical, migrated));
            }
        }

        if transient_failures > 0 {
            if looks_like_tag(saved) {
                warn!(saved, transient_failures, "could not verify saved version, keeping it");
            } else {
                warn!(saved, transient_failures, "could not verify non-tag saved version");
            }
        } else {
            warn!(saved, "saved version not found as a release tag, keeping it");
        }
        Ok((saved.to_string(), false))
    }
}

fn looks_like_tag(value: &str) -> bool {
    value.contains("-v") || value.starts_with('v') || value.starts_with("rust")
}
