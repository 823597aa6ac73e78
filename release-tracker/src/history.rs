//! History push: announce Claude Code versions that were never pushed to the channel,
//! oldest first, with a pause between messages.

use tracing::{error, info, instrument};
use tracker_core::Result;

use crate::components::ProductComponents;
use crate::sources::claude_code::{parse_all, release_from_section};

/// How many pending versions one run may push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLimit {
    Count(usize),
    All,
}

impl HistoryLimit {
    fn take(self) -> usize {
        match self {
            HistoryLimit::Count(n) => n,
            HistoryLimit::All => usize::MAX,
        }
    }
}

/// Result of one history run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryReport {
    /// Versions in the changelog missing from the pushed record, before the limit.
    pub pending: usize,
    /// Versions pushed (and recorded) by this run, in push order.
    pub pushed: Vec<String>,
    /// The version that stopped the run and its error.
    pub failed: Option<(String, String)>,
}

impl HistoryReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }
}

/// Pushes pending versions of `changelog`. Transports retry their own calls, so a dispatch is
/// attempted once; the first version that fails stops the run. Version and message records are
/// untouched.
#[instrument(skip(components, changelog), fields(product = %components.product))]
pub async fn push_history(
    components: &ProductComponents,
    changelog: &str,
    limit: HistoryLimit,
) -> Result<HistoryReport> {
    let pushed = components.state.pushed_versions(components.product).await?;
    let pending: Vec<(String, String)> = parse_all(changelog)
        .into_iter()
        .filter(|(version, _)| !pushed.contains(version))
        .collect();

    let mut report = HistoryReport {
        pending: pending.len(),
        ..Default::default()
    };
    if pending.is_empty() {
        info!("no pending versions");
        return Ok(report);
    }
    info!(
        pending = pending.len(),
        limit = ?limit,
        "pushing history"
    );

    let checker = components.checker();
    let dispatcher = components.dispatcher();

    for (index, (version, section)) in pending.iter().take(limit.take()).enumerate() {
        if index > 0 {
            tokio::time::sleep(components.retry.delay).await;
        }
        let release = release_from_section(version, section);
        let content = checker.prepare(&release).await;
        match dispatcher.dispatch(&content).await {
            Ok(message_ids) => {
                components
                    .state
                    .append_pushed_version(components.product, version)
                    .await?;
                info!(version = %version, message_ids = ?message_ids, "pushed");
                report.pushed.push(version.clone());
            }
            Err(e) => {
                error!(version = %version, error = %e, "push failed, stopping");
                report.failed = Some((version.clone(), e.to_string()));
                break;
            }
        }
    }

    info!(
        pushed = report.pushed.len(),
        remaining = report.pending - report.pushed.len(),
        "history push finished"
    );
    Ok(report)
}
