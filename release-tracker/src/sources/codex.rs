//! OpenAI Codex releases: Atom feed entries verified against the GitHub release API.

use changelog_text::{clean_release_body, release_html_to_text};
use serde::Deserialize;
use tracing::{info, warn};
use tracker_core::{Result, TrackerError};

use super::github::{GithubClient, TagStatus};
use super::{fetch_text, http_client, LatestRelease};

pub const RELEASES_ATOM_URL: &str = "https://github.com/openai/codex/releases.atom";
pub const REPO: &str = "openai/codex";

/// Shown instead of an empty release body.
pub const EMPTY_BODY_PLACEHOLDER: &str = "（暂无更新说明）";

const UNSTABLE_KEYWORDS: &[&str] = &[
    "alpha", "beta", "rc", "preview", "pre", "dev", "nightly", "snapshot", "test",
];

/// Case-insensitive substring check, so `0.5.0-alpha.1` and `Preview build` are both unstable.
pub fn is_unstable_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    UNSTABLE_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(default)]
    link: Vec<AtomLink>,
    content: Option<AtomContent>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomContent {
    #[serde(rename = "$text", default)]
    text: String,
}

/// One feed entry with HTML content already flattened and cleaned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub content: String,
}

impl FeedEntry {
    /// Last path segment of the release link, falling back to the title.
    pub fn tag_from_link(&self) -> String {
        self.link
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.title)
            .to_string()
    }
}

/// Parses the Atom document. Entries without a title are skipped.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let feed: AtomFeed = quick_xml::de::from_str(xml)
        .map_err(|e| TrackerError::Feed(format!("releases feed XML: {e}")))?;
    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title?.trim().to_string();
            if title.is_empty() {
                return None;
            }
            let link = entry
                .link
                .into_iter()
                .find_map(|l| l.href)
                .unwrap_or_default();
            let content = entry
                .content
                .map(|c| clean_release_body(&release_html_to_text(&c.text)))
                .unwrap_or_default();
            Some(FeedEntry {
                title,
                link,
                content,
            })
        })
        .collect())
}

/// Walks entries newest first and returns the first one the API confirms as stable.
///
/// Auth, JSON and unexpected API errors abort at once. Rate-limit, server and network errors
/// are collected and fail the selection even when a stable entry is found afterwards.
pub async fn select_latest_stable(
    entries: &[FeedEntry],
    github: &GithubClient,
) -> Result<Option<LatestRelease>> {
    let mut recoverable: Vec<String> = Vec::new();
    let mut found = None;

    for entry in entries {
        if is_unstable_title(&entry.title) {
            info!(title = %entry.title, "skipping unstable release");
            continue;
        }
        let tag = entry.tag_from_link();
        let status = github.release_status(&tag).await;
        match status {
            TagStatus::Stable { tag_name } => {
                info!(title = %entry.title, tag = %tag_name, "confirmed stable release");
                found = Some(LatestRelease {
                    key: tag_name,
                    display_version: entry.title.clone(),
                    body: entry.content.clone(),
                    source_url: Some(entry.link.clone()).filter(|l| !l.is_empty()),
                });
                break;
            }
            s if s.is_fatal() => {
                return Err(TrackerError::Feed(format!(
                    "GitHub release check for {} failed: {s:?}",
                    entry.title
                )));
            }
            s if s.is_recoverable() => {
                warn!(title = %entry.title, status = ?s, "GitHub release check failed");
                recoverable.push(format!("{}: {s:?}", entry.title));
            }
            s => info!(title = %entry.title, status = ?s, "skipping non-release entry"),
        }
    }

    if !recoverable.is_empty() {
        let summary = recoverable.iter().take(3).cloned().collect::<Vec<_>>().join("; ");
        return Err(TrackerError::Network(format!("GitHub API errors: {summary}")));
    }
    Ok(found)
}

/// Fetches the feed and resolves tags through the GitHub API.
pub struct CodexSource {
    client: reqwest::Client,
    feed_url: String,
    github: GithubClient,
}

impl CodexSource {
    pub fn new(github: GithubClient) -> Result<Self> {
        Self::with_feed_url(RELEASES_ATOM_URL, github)
    }

    pub fn with_feed_url(feed_url: impl Into<String>, github: GithubClient) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            feed_url: feed_url.into(),
            github,
        })
    }

    pub fn github(&self) -> &GithubClient {
        &self.github
    }

    /// Newest stable release, or `None` when the feed holds none.
    pub async fn latest(&self) -> Result<Option<LatestRelease>> {
        let xml = fetch_text(&self.client, &self.feed_url).await?;
        let entries = parse_feed(&xml)?;
        select_latest_stable(&entries, &self.github).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/" xml:lang="en-US">
  <id>tag:github.com,2008:https://github.com/openai/codex/releases</id>
  <title>Release notes from codex</title>
  <entry>
    <id>tag:github.com,2008:Repository/1/rust-v0.6.0-alpha.1</id>
    <link rel="alternate" type="text/html" href="https://github.com/openai/codex/releases/tag/rust-v0.6.0-alpha.1"/>
    <title>0.6.0-alpha.1</title>
    <content type="html">&lt;p&gt;alpha&lt;/p&gt;</content>
  </entry>
  <entry>
    <id>tag:github.com,2008:Repository/1/rust-v0.5.0</id>
    <updated>2025-10-01T00:00:00Z</updated>
    <link rel="alternate" type="text/html" href="https://github.com/openai/codex/releases/tag/rust-v0.5.0"/>
    <title>0.5.0</title>
    <content type="html">&lt;ul&gt;&lt;li&gt;Faster startup (#6222)&lt;/li&gt;&lt;li&gt;Fix &amp;amp; polish&lt;/li&gt;&lt;/ul&gt;</content>
    <author><name>codex-bot</name></author>
  </entry>
</feed>"#;

    #[test]
    fn test_unstable_titles() {
        assert!(is_unstable_title("0.6.0-alpha.1"));
        assert!(is_unstable_title("0.6.0 RC2"));
        assert!(!is_unstable_title("0.5.0"));
    }

    #[test]
    fn test_parse_feed_entries() {
        let entries = parse_feed(FEED).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].title, "0.5.0");
        assert_eq!(entries[1].tag_from_link(), "rust-v0.5.0");
        assert_eq!(entries[1].content, "- Faster startup\n- Fix & polish");
    }

    #[test]
    fn test_tag_falls_back_to_title() {
        let entry = FeedEntry {
            title: "0.4.0".into(),
            link: String::new(),
            content: String::new(),
        };
        assert_eq!(entry.tag_from_link(), "0.4.0");
    }

    #[test]
    fn test_invalid_xml_is_feed_error() {
        assert!(matches!(parse_feed("<feed><entry>"), Err(TrackerError::Feed(_))));
    }
}
