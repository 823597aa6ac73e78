//! Per-product runs: fetch the upstream release, resolve the saved version, hand both to the
//! checker. Also the forced push of a specific Claude Code version.

use tracing::{info, instrument, warn};
use tracker_core::{MessageId, Result, TrackerError};

use crate::checker::CheckOutcome;
use crate::components::ProductComponents;
use crate::sources::claude_code::{is_version, parse_latest, parse_version, release_from_section, ClaudeCodeSource};
use crate::sources::codex::CodexSource;

/// Checks the Claude Code changelog.
#[instrument(skip_all, fields(product = %components.product))]
pub async fn check_claude_code(
    components: &ProductComponents,
    source: &ClaudeCodeSource,
) -> Result<CheckOutcome> {
    let release = source.latest().await?;
    info!(version = %release.key, "latest version");
    let saved = components.state.saved_version(components.product).await?;
    components.checker().process(&release, saved.as_deref()).await
}

/// Checks the Codex releases feed. A saved version that is an old display title is mapped to
/// its tag first. When that tag is the feed's release, the record is rewritten before the
/// check runs, so the migration holds even if the check itself fails.
#[instrument(skip_all, fields(product = %components.product))]
pub async fn check_codex(components: &ProductComponents, source: &CodexSource) -> Result<CheckOutcome> {
    let Some(release) = source.latest().await? else {
        warn!("no stable release in feed");
        return Ok(CheckOutcome::NoRelease);
    };
    info!(tag = %release.key, title = %release.display_version, "latest stable release");

    let saved = match components.state.saved_version(components.product).await? {
        Some(saved) if saved != release.key => {
            let (tag, migrated) = source.github().resolve_saved_version(&saved).await?;
            if migrated && tag == release.key {
                components.state.save_version(components.product, &tag).await?;
                info!(from = %saved, tag = %tag, "migrated saved version to release tag");
            }
            Some(tag)
        }
        saved => saved,
    };

    components.checker().process(&release, saved.as_deref()).await
}

/// Pushes the latest (or the given) Claude Code version without comparing against or
/// updating any record.
#[instrument(skip(components, source), fields(product = %components.product))]
pub async fn force_push_claude_code(
    components: &ProductComponents,
    source: &ClaudeCodeSource,
    version: Option<&str>,
) -> Result<Vec<MessageId>> {
    if let Some(v) = version {
        if !is_version(v) {
            return Err(TrackerError::Config(format!(
                "version must look like x.y.z, got {v:?}"
            )));
        }
    }
    let changelog = source.fetch_changelog().await?;
    let (version, section) = match version {
        Some(v) => {
            let section = parse_version(&changelog, v)
                .ok_or_else(|| TrackerError::Feed(format!("version {v} not found in CHANGELOG.md")))?;
            (v.to_string(), section)
        }
        None => parse_latest(&changelog)
            .ok_or_else(|| TrackerError::Feed("no `## x.y.z` section in CHANGELOG.md".to_string()))?,
    };
    info!(version = %version, "force pushing");
    components
        .checker()
        .force_push(&release_from_section(&version, &section))
        .await
}
