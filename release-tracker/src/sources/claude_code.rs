//! Claude Code `CHANGELOG.md`: newest section first, each starting with `## x.y.z`.

use std::sync::OnceLock;

use regex::Regex;
use tracker_core::{Result, TrackerError};

use super::{fetch_text, http_client, LatestRelease};

pub const CHANGELOG_URL: &str =
    "https://raw.githubusercontent.com/anthropics/claude-code/refs/heads/main/CHANGELOG.md";

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^## (\d+\.\d+\.\d+)").expect("version heading pattern"))
}

/// Whether `value` is a plain `x.y.z` version.
pub fn is_version(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern"))
        .is_match(value)
}

/// Splits the changelog into `(version, section)` pairs in file order (newest first).
/// A section includes its heading line; trailing blank lines are dropped.
fn sections(changelog: &str) -> Vec<(String, String)> {
    let mut out: Vec<(String, Vec<&str>)> = Vec::new();
    for line in changelog.lines() {
        if let Some(caps) = heading_regex().captures(line) {
            out.push((caps[1].to_string(), vec![line]));
        } else if let Some((_, lines)) = out.last_mut() {
            lines.push(line);
        }
    }
    out.into_iter()
        .map(|(version, mut lines)| {
            while lines.last().is_some_and(|l| l.trim().is_empty()) {
                lines.pop();
            }
            (version, lines.join("\n"))
        })
        .collect()
}

/// Newest version and its section.
pub fn parse_latest(changelog: &str) -> Option<(String, String)> {
    sections(changelog).into_iter().next()
}

/// Section of one specific version.
pub fn parse_version(changelog: &str, version: &str) -> Option<String> {
    sections(changelog)
        .into_iter()
        .find(|(v, _)| v == version)
        .map(|(_, content)| content)
}

/// Every version, oldest first.
pub fn parse_all(changelog: &str) -> Vec<(String, String)> {
    let mut all = sections(changelog);
    all.reverse();
    all
}

/// Release record for a changelog section. The version doubles as the persisted key.
pub fn release_from_section(version: &str, section: &str) -> LatestRelease {
    LatestRelease {
        key: version.to_string(),
        display_version: version.to_string(),
        body: section.to_string(),
        source_url: None,
    }
}

/// Fetches the raw changelog.
pub struct ClaudeCodeSource {
    client: reqwest::Client,
    url: String,
}

impl ClaudeCodeSource {
    pub fn new() -> Result<Self> {
        Self::with_url(CHANGELOG_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            url: url.into(),
        })
    }

    pub async fn fetch_changelog(&self) -> Result<String> {
        let text = fetch_text(&self.client, &self.url).await?;
        if text.trim().is_empty() {
            return Err(TrackerError::Feed("empty CHANGELOG.md".to_string()));
        }
        Ok(text)
    }

    /// Fetches and parses the newest release.
    pub async fn latest(&self) -> Result<LatestRelease> {
        let changelog = self.fetch_changelog().await?;
        let (version, section) = parse_latest(&changelog)
            .ok_or_else(|| TrackerError::Feed("no `## x.y.z` section in CHANGELOG.md".to_string()))?;
        Ok(release_from_section(&version, &section))
    }
}
