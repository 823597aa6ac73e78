//! Telegraph publisher: long release notes become a page, the channel gets a link.

use std::time::Duration;

use async_trait::async_trait;
use changelog_text::html_to_nodes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracker_core::{PublishedPage, Publisher, Result, RetryPolicy, TrackerError};

pub const TELEGRAPH_API: &str = "https://api.telegra.ph";

const CONTENT_TOO_BIG: &str = "CONTENT_TOO_BIG";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Account token and byline for created pages.
#[derive(Clone, PartialEq)]
pub struct TelegraphConfig {
    /// `None` makes every publish fail with a config error.
    pub access_token: Option<String>,
    pub author_name: String,
    pub author_url: String,
    pub api_base: String,
}

impl std::fmt::Debug for TelegraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegraphConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("author_name", &self.author_name)
            .field("author_url", &self.author_url)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl TelegraphConfig {
    pub fn new(access_token: Option<String>, author_name: &str, author_url: &str) -> Self {
        Self {
            access_token,
            author_name: author_name.to_string(),
            author_url: author_url.to_string(),
            api_base: TELEGRAPH_API.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Serialize)]
struct CreatePageRequest<'a> {
    access_token: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    author_name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    author_url: &'a str,
    content: Vec<changelog_text::Node>,
    return_content: bool,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    result: Option<PageResult>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct PageResult {
    path: String,
    url: String,
}

/// Creates Telegraph pages from the HTML subset produced by `changelog_text::markdown_to_html`.
pub struct TelegraphPublisher {
    client: reqwest::Client,
    config: TelegraphConfig,
    retry: RetryPolicy,
}

impl TelegraphPublisher {
    pub fn new(config: TelegraphConfig, retry: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TrackerError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            config,
            retry,
        })
    }

    pub fn config(&self) -> &TelegraphConfig {
        &self.config
    }

    async fn create_page(&self, token: &str, title: &str, html: &str) -> Result<PublishedPage> {
        let body = CreatePageRequest {
            access_token: token,
            title,
            author_name: &self.config.author_name,
            author_url: &self.config.author_url,
            content: html_to_nodes(html),
            return_content: false,
        };
        let url = format!("{}/createPage", self.config.api_base.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        let parsed: ApiResponse = response.json().await.map_err(|e| {
            if status.is_server_error() {
                TrackerError::Network(format!("telegraph HTTP {status}: {e}"))
            } else {
                TrackerError::Api(format!("telegraph response: {e}"))
            }
        })?;

        match (parsed.ok, parsed.result) {
            (true, Some(page)) => Ok(PublishedPage {
                url: page.url,
                path: page.path,
            }),
            _ => {
                let error = parsed.error.unwrap_or_else(|| "UNKNOWN_ERROR".to_string());
                if error == CONTENT_TOO_BIG {
                    Err(TrackerError::ContentTooLarge)
                } else {
                    Err(TrackerError::Api(format!("telegraph: {error}")))
                }
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TrackerError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        TrackerError::Network(e.to_string())
    } else {
        TrackerError::Api(e.to_string())
    }
}

#[async_trait]
impl Publisher for TelegraphPublisher {
    async fn publish(&self, title: &str, html: &str) -> Result<PublishedPage> {
        let token = self
            .config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TrackerError::Config("TELEGRAPH_ACCESS_TOKEN not set".to_string()))?;

        let result = self
            .retry
            .run("telegraph.createPage", || self.create_page(token, title, html))
            .await;
        match &result {
            Ok(page) => info!(url = %page.url, "Telegraph page created"),
            Err(e) => warn!(error = %e, title, "Telegraph publish failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = CreatePageRequest {
            access_token: "tok",
            title: "Codex 0.5.0 Release Notes",
            author_name: "Codex Changelog",
            author_url: "",
            content: html_to_nodes("<p>hi</p>"),
            return_content: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "access_token": "tok",
                "title": "Codex 0.5.0 Release Notes",
                "author_name": "Codex Changelog",
                "content": [{"tag": "p", "children": ["hi"]}],
                "return_content": false
            })
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let config = TelegraphConfig::new(Some("secret-token".into()), "A", "https://t.me/a");
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
